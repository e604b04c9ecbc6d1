//! the [GSUB] table
//!
//! [GSUB]: https://docs.microsoft.com/en-us/typography/opentype/spec/gsub

use crate::types::{BigEndian, GlyphId16, Offset16, Tag};

use super::layout::{read_coverages, ChainedSequenceContext, CoverageTable, SequenceContext};
use crate::array::OffsetArray;
use crate::error::{Diagnostics, FontError, Severity};
use crate::graph::{Decoded, ExtensionSubtable};
use crate::offset::ResolveOffset;
use crate::read::{ReadError, TableRead};
use crate::segment::Segment;

#[cfg(test)]
#[path = "../tests/test_gsub.rs"]
mod tests;

/// The decoded payload of one GSUB subtable.
///
/// One variant per (lookup type, format) pair. Contextual and chained
/// contextual payloads are shared with GPOS and live in
/// [`layout`](super::layout).
#[derive(Debug, Clone)]
pub enum GsubPayload<'a> {
    SingleSubst1(SingleSubstFormat1<'a>),
    SingleSubst2(SingleSubstFormat2<'a>),
    MultipleSubst1(MultipleSubstFormat1<'a>),
    AlternateSubst1(AlternateSubstFormat1<'a>),
    LigatureSubst1(LigatureSubstFormat1<'a>),
    Contextual(SequenceContext<'a>),
    ChainContextual(ChainedSequenceContext<'a>),
    ReverseChainSingle1(ReverseChainSingleSubstFormat1<'a>),
    Extension(ExtensionSubtable<'a>),
}

/// Substitution by adding a delta to the covered glyph id.
///
/// The addition is modular: the delta is signed and the result wraps at the
/// glyph id range, per the spec.
#[derive(Debug, Clone)]
pub struct SingleSubstFormat1<'a> {
    pub coverage: CoverageTable<'a>,
    pub delta_glyph_id: i16,
}

/// Substitution via an array parallel to the coverage order.
#[derive(Debug, Clone)]
pub struct SingleSubstFormat2<'a> {
    pub coverage: CoverageTable<'a>,
    pub substitutes: &'a [BigEndian<GlyphId16>],
}

/// One-to-many substitution.
#[derive(Debug, Clone)]
pub struct MultipleSubstFormat1<'a> {
    pub coverage: CoverageTable<'a>,
    /// The replacement sequence per coverage index.
    pub sequences: Vec<&'a [BigEndian<GlyphId16>]>,
}

/// One-from-many substitution; the choice is up to the client.
#[derive(Debug, Clone)]
pub struct AlternateSubstFormat1<'a> {
    pub coverage: CoverageTable<'a>,
    pub alternate_sets: Vec<&'a [BigEndian<GlyphId16>]>,
}

/// Many-to-one substitution.
#[derive(Debug, Clone)]
pub struct LigatureSubstFormat1<'a> {
    pub coverage: CoverageTable<'a>,
    /// One set per covered first-component glyph, in coverage order.
    pub ligature_sets: Vec<Vec<Ligature<'a>>>,
}

/// A single ligature: the components after the first, and the glyph that
/// replaces the whole sequence.
#[derive(Debug, Clone)]
pub struct Ligature<'a> {
    pub ligature_glyph: GlyphId16,
    pub components: &'a [BigEndian<GlyphId16>],
}

/// Single substitution applied in reverse logical order with chained
/// context, GSUB type 8.
#[derive(Debug, Clone)]
pub struct ReverseChainSingleSubstFormat1<'a> {
    pub coverage: CoverageTable<'a>,
    pub backtrack_coverages: Vec<CoverageTable<'a>>,
    pub lookahead_coverages: Vec<CoverageTable<'a>>,
    /// Parallel to the coverage order.
    pub substitutes: &'a [BigEndian<GlyphId16>],
}

pub(crate) fn decode<'a>(
    data: Segment<'a>,
    lookup_type: u16,
    table: Tag,
    notes: &mut Diagnostics,
) -> Result<Decoded<'a, GsubPayload<'a>>, ReadError> {
    let format: u16 = data.read_at(0)?;
    match (lookup_type, format) {
        (1, 1) => {
            let subtable = SingleSubstFormat1::read(data)?;
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GsubPayload::SingleSubst1(subtable),
            })
        }
        (1, 2) => {
            let subtable = SingleSubstFormat2::read(data)?;
            if subtable.substitutes.len() != subtable.coverage.count() {
                notes.note(FontError::new(
                    table,
                    "SingleSubst",
                    ReadError::MalformedData("substitute array does not match coverage"),
                    Severity::Major,
                    data.origin(),
                ));
            }
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GsubPayload::SingleSubst2(subtable),
            })
        }
        (2, 1) => {
            let subtable = MultipleSubstFormat1::read(data)?;
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GsubPayload::MultipleSubst1(subtable),
            })
        }
        (3, 1) => {
            let subtable = AlternateSubstFormat1::read(data)?;
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GsubPayload::AlternateSubst1(subtable),
            })
        }
        (4, 1) => {
            let subtable = LigatureSubstFormat1::read(data)?;
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GsubPayload::LigatureSubst1(subtable),
            })
        }
        (5, _) => {
            let subtable = SequenceContext::read(data)?;
            if let SequenceContext::Format2(inner) = &subtable {
                if let Err(issue) = inner.class_def.sanity_check() {
                    notes.note(FontError::new(
                        table,
                        "SequenceContext",
                        issue,
                        Severity::Major,
                        data.origin(),
                    ));
                }
            }
            Ok(Decoded {
                format,
                coverage: subtable.primary_coverage(),
                payload: GsubPayload::Contextual(subtable),
            })
        }
        (6, _) => {
            let subtable = ChainedSequenceContext::read(data)?;
            Ok(Decoded {
                format,
                coverage: subtable.primary_coverage(),
                payload: GsubPayload::ChainContextual(subtable),
            })
        }
        (8, 1) => {
            let subtable = ReverseChainSingleSubstFormat1::read(data)?;
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GsubPayload::ReverseChainSingle1(subtable),
            })
        }
        (1..=4 | 8, other) => Err(ReadError::InvalidFormat(other as _)),
        (other, _) => Err(ReadError::InvalidLookupType(other)),
    }
}

impl<'a> SingleSubstFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let delta_glyph_id: i16 = cursor.read()?;
        Ok(SingleSubstFormat1 {
            coverage,
            delta_glyph_id,
        })
    }
}

impl<'a> SingleSubstFormat2<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let count: u16 = cursor.read()?;
        let substitutes = cursor.read_array(count as usize)?;
        Ok(SingleSubstFormat2 {
            coverage,
            substitutes,
        })
    }
}

impl<'a> MultipleSubstFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let sequences = OffsetArray::read(data, &mut cursor)?
            .iter_deep()
            .map(|seq| seq.and_then(read_glyph_sequence))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MultipleSubstFormat1 {
            coverage,
            sequences,
        })
    }
}

impl<'a> AlternateSubstFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let alternate_sets = OffsetArray::read(data, &mut cursor)?
            .iter_deep()
            .map(|set| set.and_then(read_glyph_sequence))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AlternateSubstFormat1 {
            coverage,
            alternate_sets,
        })
    }
}

impl<'a> LigatureSubstFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let ligature_sets = OffsetArray::read(data, &mut cursor)?
            .iter_deep()
            .map(|set| set.and_then(read_ligature_set))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(LigatureSubstFormat1 {
            coverage,
            ligature_sets,
        })
    }
}

impl<'a> ReverseChainSingleSubstFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let backtrack_count: u16 = cursor.read()?;
        let backtrack_coverages = read_coverages(data, &mut cursor, backtrack_count)?;
        let lookahead_count: u16 = cursor.read()?;
        let lookahead_coverages = read_coverages(data, &mut cursor, lookahead_count)?;
        let count: u16 = cursor.read()?;
        let substitutes = cursor.read_array(count as usize)?;
        Ok(ReverseChainSingleSubstFormat1 {
            coverage,
            backtrack_coverages,
            lookahead_coverages,
            substitutes,
        })
    }
}

/// A count-prefixed glyph array, as used by sequence and alternate-set
/// tables.
fn read_glyph_sequence(data: Segment) -> Result<&[BigEndian<GlyphId16>], ReadError> {
    let mut cursor = data.cursor();
    let count: u16 = cursor.read()?;
    cursor.read_array(count as usize)
}

fn read_ligature_set(data: Segment) -> Result<Vec<Ligature>, ReadError> {
    OffsetArray::read_from(data)?
        .iter_deep()
        .map(|lig| lig.and_then(Ligature::read))
        .collect()
}

impl<'a> Ligature<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let ligature_glyph: GlyphId16 = cursor.read()?;
        let component_count: u16 = cursor.read()?;
        let rest = component_count
            .checked_sub(1)
            .ok_or(ReadError::MalformedData("empty ligature"))?;
        let components = cursor.read_array(rest as usize)?;
        Ok(Ligature {
            ligature_glyph,
            components,
        })
    }
}

//! the [GPOS] table
//!
//! [GPOS]: https://docs.microsoft.com/en-us/typography/opentype/spec/gpos

#[path = "./value_record.rs"]
mod value_record;

pub use value_record::{ValueFormat, ValueRecord};

use crate::types::{BigEndian, FixedSize, GlyphId16, Offset16, Tag};

use super::layout::{ChainedSequenceContext, ClassDef, CoverageTable, SequenceContext};
use crate::array::OffsetArray;
use crate::error::{Diagnostics, FontError, Severity};
use crate::graph::{Decoded, ExtensionSubtable};
use crate::offset::{Offset, ResolveOffset};
use crate::read::{ReadError, TableRead};
use crate::segment::Segment;

#[cfg(test)]
#[path = "../tests/test_gpos.rs"]
mod tests;

/// The decoded payload of one GPOS subtable.
///
/// One variant per (lookup type, format) pair; the contextual payloads are
/// shared with GSUB.
#[derive(Debug, Clone)]
pub enum GposPayload<'a> {
    SinglePos1(SinglePosFormat1<'a>),
    SinglePos2(SinglePosFormat2<'a>),
    PairPos1(PairPosFormat1<'a>),
    PairPos2(PairPosFormat2<'a>),
    CursivePos1(CursivePosFormat1<'a>),
    MarkBasePos1(MarkBasePosFormat1<'a>),
    MarkLigPos1(MarkLigPosFormat1<'a>),
    MarkMarkPos1(MarkMarkPosFormat1<'a>),
    Contextual(SequenceContext<'a>),
    ChainContextual(ChainedSequenceContext<'a>),
    Extension(ExtensionSubtable<'a>),
}

/// An attachment point in glyph-design coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorTable {
    Format1(AnchorFormat1),
    Format2(AnchorFormat2),
    Format3(AnchorFormat3),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorFormat1 {
    pub x_coordinate: i16,
    pub y_coordinate: i16,
}

/// An anchor refined by a contour point index for hinted fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorFormat2 {
    pub x_coordinate: i16,
    pub y_coordinate: i16,
    pub anchor_point: u16,
}

/// An anchor with device adjustments.
///
/// The device fields are raw offsets to Device or VariationIndex tables,
/// relative to the anchor table; zero means none. Their internals are not
/// interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorFormat3 {
    pub x_coordinate: i16,
    pub y_coordinate: i16,
    pub x_device_offset: u16,
    pub y_device_offset: u16,
}

impl<'a> TableRead<'a> for AnchorTable {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let format: u16 = cursor.read()?;
        let x_coordinate: i16 = cursor.read()?;
        let y_coordinate: i16 = cursor.read()?;
        match format {
            1 => Ok(AnchorTable::Format1(AnchorFormat1 {
                x_coordinate,
                y_coordinate,
            })),
            2 => Ok(AnchorTable::Format2(AnchorFormat2 {
                x_coordinate,
                y_coordinate,
                anchor_point: cursor.read()?,
            })),
            3 => Ok(AnchorTable::Format3(AnchorFormat3 {
                x_coordinate,
                y_coordinate,
                x_device_offset: cursor.read()?,
                y_device_offset: cursor.read()?,
            })),
            other => Err(ReadError::InvalidFormat(other as _)),
        }
    }
}

impl AnchorTable {
    pub fn x_coordinate(&self) -> i16 {
        match self {
            AnchorTable::Format1(t) => t.x_coordinate,
            AnchorTable::Format2(t) => t.x_coordinate,
            AnchorTable::Format3(t) => t.x_coordinate,
        }
    }

    pub fn y_coordinate(&self) -> i16 {
        match self {
            AnchorTable::Format1(t) => t.y_coordinate,
            AnchorTable::Format2(t) => t.y_coordinate,
            AnchorTable::Format3(t) => t.y_coordinate,
        }
    }
}

/// Position a single glyph, same adjustment for every covered glyph.
#[derive(Debug, Clone)]
pub struct SinglePosFormat1<'a> {
    pub coverage: CoverageTable<'a>,
    pub value_format: ValueFormat,
    pub value: ValueRecord,
}

/// Position a single glyph, one adjustment per covered glyph.
#[derive(Debug, Clone)]
pub struct SinglePosFormat2<'a> {
    pub coverage: CoverageTable<'a>,
    pub value_format: ValueFormat,
    /// Parallel to the coverage order.
    pub values: Vec<ValueRecord>,
}

/// Pair adjustment listed per (first glyph, second glyph) pair.
#[derive(Debug, Clone)]
pub struct PairPosFormat1<'a> {
    pub coverage: CoverageTable<'a>,
    pub value_format1: ValueFormat,
    pub value_format2: ValueFormat,
    /// One set per covered first glyph, in coverage order.
    pub pair_sets: Vec<Vec<PairValueRecord>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairValueRecord {
    pub second_glyph: GlyphId16,
    pub value1: ValueRecord,
    pub value2: ValueRecord,
}

/// Pair adjustment by glyph class matrix.
#[derive(Debug, Clone)]
pub struct PairPosFormat2<'a> {
    pub coverage: CoverageTable<'a>,
    pub value_format1: ValueFormat,
    pub value_format2: ValueFormat,
    pub class_def1: ClassDef<'a>,
    pub class_def2: ClassDef<'a>,
    pub class1_count: u16,
    pub class2_count: u16,
    /// `class1_count` rows of `class2_count` records.
    pub class_records: Vec<Vec<ClassRecord>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassRecord {
    pub value1: ValueRecord,
    pub value2: ValueRecord,
}

impl<'a> PairPosFormat2<'a> {
    /// The record for a `(class1, class2)` pair.
    pub fn class_record(&self, class1: u16, class2: u16) -> Option<&ClassRecord> {
        self.class_records
            .get(class1 as usize)?
            .get(class2 as usize)
    }
}

/// Cursive attachment via entry and exit anchors.
#[derive(Debug, Clone)]
pub struct CursivePosFormat1<'a> {
    pub coverage: CoverageTable<'a>,
    /// Parallel to the coverage order.
    pub entry_exits: Vec<EntryExit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryExit {
    pub entry: Option<AnchorTable>,
    pub exit: Option<AnchorTable>,
}

/// A mark's class and its attachment anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkRecord {
    pub mark_class: u16,
    pub anchor: AnchorTable,
}

/// Attach marks to base glyphs.
#[derive(Debug, Clone)]
pub struct MarkBasePosFormat1<'a> {
    pub mark_coverage: CoverageTable<'a>,
    pub base_coverage: CoverageTable<'a>,
    pub mark_class_count: u16,
    /// Parallel to the mark coverage order.
    pub mark_records: Vec<MarkRecord>,
    /// Per base glyph, one anchor slot per mark class.
    pub base_records: Vec<Vec<Option<AnchorTable>>>,
}

/// Attach marks to ligature components.
#[derive(Debug, Clone)]
pub struct MarkLigPosFormat1<'a> {
    pub mark_coverage: CoverageTable<'a>,
    pub ligature_coverage: CoverageTable<'a>,
    pub mark_class_count: u16,
    pub mark_records: Vec<MarkRecord>,
    /// Per ligature, per component, one anchor slot per mark class.
    pub ligature_records: Vec<Vec<Vec<Option<AnchorTable>>>>,
}

/// Attach marks to other marks.
#[derive(Debug, Clone)]
pub struct MarkMarkPosFormat1<'a> {
    pub mark1_coverage: CoverageTable<'a>,
    pub mark2_coverage: CoverageTable<'a>,
    pub mark_class_count: u16,
    pub mark1_records: Vec<MarkRecord>,
    /// Per mark2 glyph, one anchor slot per mark class.
    pub mark2_records: Vec<Vec<Option<AnchorTable>>>,
}

pub(crate) fn decode<'a>(
    data: Segment<'a>,
    lookup_type: u16,
    table: Tag,
    notes: &mut Diagnostics,
) -> Result<Decoded<'a, GposPayload<'a>>, ReadError> {
    let format: u16 = data.read_at(0)?;
    match (lookup_type, format) {
        (1, 1) => {
            let subtable = SinglePosFormat1::read(data)?;
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GposPayload::SinglePos1(subtable),
            })
        }
        (1, 2) => {
            let subtable = SinglePosFormat2::read(data)?;
            if subtable.values.len() != subtable.coverage.count() {
                notes.note(FontError::new(
                    table,
                    "SinglePos",
                    ReadError::MalformedData("value array does not match coverage"),
                    Severity::Major,
                    data.origin(),
                ));
            }
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GposPayload::SinglePos2(subtable),
            })
        }
        (2, 1) => {
            let subtable = PairPosFormat1::read(data)?;
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GposPayload::PairPos1(subtable),
            })
        }
        (2, 2) => {
            let subtable = PairPosFormat2::read(data)?;
            for (class_def, count) in [
                (&subtable.class_def1, subtable.class1_count),
                (&subtable.class_def2, subtable.class2_count),
            ] {
                let issue = match class_def.sanity_check() {
                    Err(issue) => Some(issue),
                    Ok(()) if class_def.max_class() >= count => {
                        Some(ReadError::MalformedData("class value exceeds class count"))
                    }
                    Ok(()) => None,
                };
                if let Some(issue) = issue {
                    notes.note(FontError::new(
                        table,
                        "PairPos",
                        issue,
                        Severity::Major,
                        data.origin(),
                    ));
                }
            }
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GposPayload::PairPos2(subtable),
            })
        }
        (3, 1) => {
            let subtable = CursivePosFormat1::read(data)?;
            Ok(Decoded {
                format,
                coverage: Some(subtable.coverage),
                payload: GposPayload::CursivePos1(subtable),
            })
        }
        (4, 1) => {
            let subtable = MarkBasePosFormat1::read(data)?;
            check_mark_classes(
                &subtable.mark_records,
                subtable.mark_class_count,
                table,
                "MarkBasePos",
                data.origin(),
                notes,
            );
            Ok(Decoded {
                format,
                coverage: Some(subtable.mark_coverage),
                payload: GposPayload::MarkBasePos1(subtable),
            })
        }
        (5, 1) => {
            let subtable = MarkLigPosFormat1::read(data)?;
            check_mark_classes(
                &subtable.mark_records,
                subtable.mark_class_count,
                table,
                "MarkLigPos",
                data.origin(),
                notes,
            );
            Ok(Decoded {
                format,
                coverage: Some(subtable.mark_coverage),
                payload: GposPayload::MarkLigPos1(subtable),
            })
        }
        (6, 1) => {
            let subtable = MarkMarkPosFormat1::read(data)?;
            check_mark_classes(
                &subtable.mark1_records,
                subtable.mark_class_count,
                table,
                "MarkMarkPos",
                data.origin(),
                notes,
            );
            Ok(Decoded {
                format,
                coverage: Some(subtable.mark1_coverage),
                payload: GposPayload::MarkMarkPos1(subtable),
            })
        }
        (7, _) => {
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
                payload: GposPayload::Contextual(subtable),
            })
        }
        (8, _) => {
            let subtable = ChainedSequenceContext::read(data)?;
            Ok(Decoded {
                format,
                coverage: subtable.primary_coverage(),
                payload: GposPayload::ChainContextual(subtable),
            })
        }
        (1..=6, other) => Err(ReadError::InvalidFormat(other as _)),
        (other, _) => Err(ReadError::InvalidLookupType(other)),
    }
}

fn check_mark_classes(
    marks: &[MarkRecord],
    mark_class_count: u16,
    table: Tag,
    section: &'static str,
    offset: u32,
    notes: &mut Diagnostics,
) {
    if marks.iter().any(|rec| rec.mark_class >= mark_class_count) {
        notes.note(FontError::new(
            table,
            section,
            ReadError::MalformedData("mark class exceeds mark class count"),
            Severity::Major,
            offset,
        ));
    }
}

impl<'a> SinglePosFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let value_format = ValueFormat::from_bits_truncate(cursor.read()?);
        let value = ValueRecord::read(&mut cursor, value_format)?;
        Ok(SinglePosFormat1 {
            coverage,
            value_format,
            value,
        })
    }
}

impl<'a> SinglePosFormat2<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let value_format = ValueFormat::from_bits_truncate(cursor.read()?);
        let count: u16 = cursor.read()?;
        let values = (0..count)
            .map(|_| ValueRecord::read(&mut cursor, value_format))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(SinglePosFormat2 {
            coverage,
            value_format,
            values,
        })
    }
}

impl<'a> PairPosFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let value_format1 = ValueFormat::from_bits_truncate(cursor.read()?);
        let value_format2 = ValueFormat::from_bits_truncate(cursor.read()?);
        let pair_sets = OffsetArray::read(data, &mut cursor)?
            .iter_deep()
            .map(|set| set.and_then(|set| read_pair_set(set, value_format1, value_format2)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PairPosFormat1 {
            coverage,
            value_format1,
            value_format2,
            pair_sets,
        })
    }
}

fn read_pair_set(
    data: Segment,
    value_format1: ValueFormat,
    value_format2: ValueFormat,
) -> Result<Vec<PairValueRecord>, ReadError> {
    let mut cursor = data.cursor();
    let count: u16 = cursor.read()?;
    (0..count)
        .map(|_| {
            let second_glyph: GlyphId16 = cursor.read()?;
            let value1 = ValueRecord::read(&mut cursor, value_format1)?;
            let value2 = ValueRecord::read(&mut cursor, value_format2)?;
            Ok(PairValueRecord {
                second_glyph,
                value1,
                value2,
            })
        })
        .collect()
}

impl<'a> PairPosFormat2<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let value_format1 = ValueFormat::from_bits_truncate(cursor.read()?);
        let value_format2 = ValueFormat::from_bits_truncate(cursor.read()?);
        let class_def1 = cursor.read::<Offset16>()?.resolve(data)?;
        let class_def2 = cursor.read::<Offset16>()?.resolve(data)?;
        let class1_count: u16 = cursor.read()?;
        let class2_count: u16 = cursor.read()?;
        let class_records = (0..class1_count)
            .map(|_| {
                (0..class2_count)
                    .map(|_| {
                        let value1 = ValueRecord::read(&mut cursor, value_format1)?;
                        let value2 = ValueRecord::read(&mut cursor, value_format2)?;
                        Ok(ClassRecord { value1, value2 })
                    })
                    .collect::<Result<Vec<_>, ReadError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PairPosFormat2 {
            coverage,
            value_format1,
            value_format2,
            class_def1,
            class_def2,
            class1_count,
            class2_count,
            class_records,
        })
    }
}

impl<'a> CursivePosFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let count: u16 = cursor.read()?;
        let entry_exits = (0..count)
            .map(|_| {
                let entry = read_nullable_anchor(data, cursor.read()?)?;
                let exit = read_nullable_anchor(data, cursor.read()?)?;
                Ok(EntryExit { entry, exit })
            })
            .collect::<Result<Vec<_>, ReadError>>()?;
        Ok(CursivePosFormat1 {
            coverage,
            entry_exits,
        })
    }
}

impl<'a> MarkBasePosFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let mark_coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let base_coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let mark_class_count: u16 = cursor.read()?;
        let mark_records = read_mark_array(cursor.read::<Offset16>()?.jump(data)?)?;
        let base_records =
            read_anchor_matrix(cursor.read::<Offset16>()?.jump(data)?, mark_class_count)?;
        Ok(MarkBasePosFormat1 {
            mark_coverage,
            base_coverage,
            mark_class_count,
            mark_records,
            base_records,
        })
    }
}

impl<'a> MarkLigPosFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let mark_coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let ligature_coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let mark_class_count: u16 = cursor.read()?;
        let mark_records = read_mark_array(cursor.read::<Offset16>()?.jump(data)?)?;
        let ligature_array = cursor.read::<Offset16>()?.jump(data)?;
        let ligature_records = OffsetArray::read_from(ligature_array)?
            .iter_deep()
            .map(|attach| attach.and_then(|attach| read_anchor_matrix(attach, mark_class_count)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(MarkLigPosFormat1 {
            mark_coverage,
            ligature_coverage,
            mark_class_count,
            mark_records,
            ligature_records,
        })
    }
}

impl<'a> MarkMarkPosFormat1<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let _format: u16 = cursor.read()?;
        let mark1_coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let mark2_coverage = cursor.read::<Offset16>()?.resolve(data)?;
        let mark_class_count: u16 = cursor.read()?;
        let mark1_records = read_mark_array(cursor.read::<Offset16>()?.jump(data)?)?;
        let mark2_records =
            read_anchor_matrix(cursor.read::<Offset16>()?.jump(data)?, mark_class_count)?;
        Ok(MarkMarkPosFormat1 {
            mark1_coverage,
            mark2_coverage,
            mark_class_count,
            mark1_records,
            mark2_records,
        })
    }
}

/// The wire form of a mark-array record.
#[derive(Copy, Clone, Debug, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
struct RawMarkRecord {
    mark_class: BigEndian<u16>,
    mark_anchor_offset: BigEndian<Offset16>,
}

impl FixedSize for RawMarkRecord {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

fn read_mark_array(data: Segment) -> Result<Vec<MarkRecord>, ReadError> {
    let mut cursor = data.cursor();
    let count: u16 = cursor.read()?;
    let raw: &[RawMarkRecord] = cursor.read_array(count as usize)?;
    raw.iter()
        .map(|rec| {
            let anchor = rec.mark_anchor_offset.get().resolve(data)?;
            Ok(MarkRecord {
                mark_class: rec.mark_class.get(),
                anchor,
            })
        })
        .collect()
}

/// A count-prefixed matrix of nullable anchor offsets, `columns` per row.
///
/// This is the layout shared by BaseArray, Mark2Array and LigatureAttach;
/// the offsets are relative to the matrix table itself.
fn read_anchor_matrix(
    data: Segment,
    columns: u16,
) -> Result<Vec<Vec<Option<AnchorTable>>>, ReadError> {
    let mut cursor = data.cursor();
    let count: u16 = cursor.read()?;
    let total = (count as usize)
        .checked_mul(columns as usize)
        .ok_or(ReadError::OutOfBounds)?;
    let offsets: &[BigEndian<Offset16>] = cursor.read_array(total)?;
    offsets
        .chunks(columns.max(1) as usize)
        .map(|row| {
            row.iter()
                .map(|off| read_nullable_anchor(data, off.get()))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}

fn read_nullable_anchor(base: Segment, offset: Offset16) -> Result<Option<AnchorTable>, ReadError> {
    match offset.non_null() {
        None => Ok(None),
        Some(pos) => base
            .jump(pos)
            .ok_or(ReadError::OutOfBounds)
            .and_then(AnchorTable::read)
            .map(Some),
    }
}

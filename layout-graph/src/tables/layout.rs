//! OpenType layout structures shared between GSUB and GPOS

mod lookup_flag;

pub use lookup_flag::LookupFlag;

use crate::types::{BigEndian, FixedSize, GlyphId16, Offset16};

use crate::array::{self, RecordArray};
use crate::offset::{Offset, ResolveOffset};
use crate::read::{ReadError, TableRead};
use crate::segment::{Cursor, Segment};

#[cfg(test)]
#[path = "../tests/test_layout.rs"]
mod tests;

/// A [coverage table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#coverage-table).
///
/// Maps each covered glyph to its coverage index, the position used to index
/// the tables that run parallel to the coverage.
#[derive(Debug, Clone, Copy)]
pub enum CoverageTable<'a> {
    Format1(CoverageFormat1<'a>),
    Format2(CoverageFormat2<'a>),
}

/// A list of individual glyph ids, sorted ascending.
#[derive(Debug, Clone, Copy)]
pub struct CoverageFormat1<'a> {
    glyphs: &'a [BigEndian<GlyphId16>],
}

/// A list of glyph ranges, sorted by start glyph and non-overlapping.
#[derive(Debug, Clone, Copy)]
pub struct CoverageFormat2<'a> {
    ranges: &'a [RangeRecord],
}

/// One contiguous run of covered glyphs.
#[derive(Copy, Clone, Debug, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct RangeRecord {
    pub start_glyph_id: BigEndian<GlyphId16>,
    pub end_glyph_id: BigEndian<GlyphId16>,
    pub start_coverage_index: BigEndian<u16>,
}

impl FixedSize for RangeRecord {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl RangeRecord {
    fn glyphs(&self) -> impl Iterator<Item = GlyphId16> + '_ {
        (self.start_glyph_id.get().to_u16()..=self.end_glyph_id.get().to_u16()).map(GlyphId16::new)
    }
}

impl<'a> TableRead<'a> for CoverageTable<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        match cursor.read::<u16>()? {
            1 => Ok(CoverageTable::Format1(CoverageFormat1 {
                glyphs: RecordArray::read(&mut cursor)?.as_slice(),
            })),
            2 => Ok(CoverageTable::Format2(CoverageFormat2 {
                ranges: RecordArray::read(&mut cursor)?.as_slice(),
            })),
            other => Err(ReadError::InvalidFormat(other as _)),
        }
    }
}

impl<'a> CoverageTable<'a> {
    /// The coverage index for `glyph`, if it is covered.
    pub fn get(&self, glyph: GlyphId16) -> Option<u16> {
        match self {
            CoverageTable::Format1(table) => table
                .glyphs
                .binary_search_by(|probe| probe.get().cmp(&glyph))
                .ok()
                .map(|idx| idx as u16),
            CoverageTable::Format2(table) => {
                let idx = table
                    .ranges
                    .binary_search_by(|rec| {
                        if rec.end_glyph_id.get() < glyph {
                            std::cmp::Ordering::Less
                        } else if rec.start_glyph_id.get() > glyph {
                            std::cmp::Ordering::Greater
                        } else {
                            std::cmp::Ordering::Equal
                        }
                    })
                    .ok()?;
                let record = &table.ranges[idx];
                let delta = glyph.to_u16().checked_sub(record.start_glyph_id.get().to_u16())?;
                record.start_coverage_index.get().checked_add(delta)
            }
        }
    }

    /// The number of covered glyphs.
    pub fn count(&self) -> usize {
        match self {
            CoverageTable::Format1(table) => table.glyphs.len(),
            CoverageTable::Format2(table) => table
                .ranges
                .iter()
                .map(|rec| {
                    rec.end_glyph_id
                        .get()
                        .to_u16()
                        .saturating_sub(rec.start_glyph_id.get().to_u16()) as usize
                        + 1
                })
                .sum(),
        }
    }

    /// Iterate all covered glyphs, in coverage order.
    pub fn iter(&self) -> impl Iterator<Item = GlyphId16> + 'a {
        // all one expression so that we have a single return type
        let (iter1, iter2) = match self {
            CoverageTable::Format1(t) => (Some(t.glyphs.iter().map(|g| g.get())), None),
            CoverageTable::Format2(t) => {
                (None, Some(t.ranges.iter().flat_map(RangeRecord::glyphs)))
            }
        };
        iter1
            .into_iter()
            .flatten()
            .chain(iter2.into_iter().flatten())
    }

    /// Check the ordering invariants the format requires.
    ///
    /// Format 1 glyph ids must be strictly increasing; format 2 ranges must
    /// be internally consistent, sorted by start glyph, and non-overlapping.
    /// A violation degrades lookups (binary search may miss glyphs) but does
    /// not make the table unreadable.
    pub fn sanity_check(&self) -> Result<(), ReadError> {
        match self {
            CoverageTable::Format1(table) => {
                let sorted = table
                    .glyphs
                    .windows(2)
                    .all(|pair| pair[0].get() < pair[1].get());
                sorted
                    .then_some(())
                    .ok_or(ReadError::MalformedData("coverage glyphs not sorted"))
            }
            CoverageTable::Format2(table) => {
                let consistent = table
                    .ranges
                    .iter()
                    .all(|rec| rec.start_glyph_id.get() <= rec.end_glyph_id.get());
                let sorted = table
                    .ranges
                    .windows(2)
                    .all(|pair| pair[0].end_glyph_id.get() < pair[1].start_glyph_id.get());
                (consistent && sorted)
                    .then_some(())
                    .ok_or(ReadError::MalformedData("coverage ranges overlap"))
            }
        }
    }
}

/// A [class definition table](https://learn.microsoft.com/en-us/typography/opentype/spec/chapter2#class-definition-table).
///
/// Partitions the glyph space into integer classes; any glyph the table does
/// not mention belongs to class 0.
#[derive(Debug, Clone, Copy)]
pub enum ClassDef<'a> {
    Format1(ClassDefFormat1<'a>),
    Format2(ClassDefFormat2<'a>),
}

/// Class values for a contiguous run of glyphs starting at `start_glyph_id`.
#[derive(Debug, Clone, Copy)]
pub struct ClassDefFormat1<'a> {
    start_glyph_id: GlyphId16,
    classes: &'a [BigEndian<u16>],
}

/// Class values per glyph range.
#[derive(Debug, Clone, Copy)]
pub struct ClassDefFormat2<'a> {
    ranges: &'a [ClassRangeRecord],
}

#[derive(Copy, Clone, Debug, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct ClassRangeRecord {
    pub start_glyph_id: BigEndian<GlyphId16>,
    pub end_glyph_id: BigEndian<GlyphId16>,
    pub class: BigEndian<u16>,
}

impl FixedSize for ClassRangeRecord {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl<'a> TableRead<'a> for ClassDef<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        match cursor.read::<u16>()? {
            1 => {
                let start_glyph_id: GlyphId16 = cursor.read()?;
                let classes = RecordArray::read(&mut cursor)?.as_slice();
                Ok(ClassDef::Format1(ClassDefFormat1 {
                    start_glyph_id,
                    classes,
                }))
            }
            2 => Ok(ClassDef::Format2(ClassDefFormat2 {
                ranges: RecordArray::read(&mut cursor)?.as_slice(),
            })),
            other => Err(ReadError::InvalidFormat(other as _)),
        }
    }
}

impl<'a> ClassDef<'a> {
    /// The class of `glyph`; 0 if the table does not assign one.
    pub fn get(&self, glyph: GlyphId16) -> u16 {
        match self {
            ClassDef::Format1(table) => {
                let Some(idx) = glyph
                    .to_u16()
                    .checked_sub(table.start_glyph_id.to_u16())
                else {
                    return 0;
                };
                table
                    .classes
                    .get(idx as usize)
                    .map(|class| class.get())
                    .unwrap_or_default()
            }
            ClassDef::Format2(table) => table
                .ranges
                .binary_search_by(|rec| {
                    if rec.end_glyph_id.get() < glyph {
                        std::cmp::Ordering::Less
                    } else if rec.start_glyph_id.get() > glyph {
                        std::cmp::Ordering::Greater
                    } else {
                        std::cmp::Ordering::Equal
                    }
                })
                .ok()
                .map(|idx| table.ranges[idx].class.get())
                .unwrap_or_default(),
        }
    }

    /// The largest class value the table assigns.
    pub fn max_class(&self) -> u16 {
        match self {
            ClassDef::Format1(table) => table
                .classes
                .iter()
                .map(|class| class.get())
                .max()
                .unwrap_or_default(),
            ClassDef::Format2(table) => table
                .ranges
                .iter()
                .map(|rec| rec.class.get())
                .max()
                .unwrap_or_default(),
        }
    }

    /// Check that format 2 ranges are sorted and non-overlapping.
    pub fn sanity_check(&self) -> Result<(), ReadError> {
        let ClassDef::Format2(table) = self else {
            return Ok(());
        };
        let consistent = table
            .ranges
            .iter()
            .all(|rec| rec.start_glyph_id.get() <= rec.end_glyph_id.get());
        let sorted = table
            .ranges
            .windows(2)
            .all(|pair| pair[0].end_glyph_id.get() < pair[1].start_glyph_id.get());
        (consistent && sorted)
            .then_some(())
            .ok_or(ReadError::MalformedData("class ranges overlap"))
    }
}

/// Tells the shaping engine to apply a nested lookup at a position inside a
/// contextual match.
///
/// `sequence_index` is 0-based into the input sequence; `lookup_list_index`
/// names a sibling lookup in the same lookup list. The reference is by index,
/// never by pointer, so the logical cross-references stay free of ownership
/// cycles.
#[derive(Copy, Clone, Debug, bytemuck::AnyBitPattern)]
#[repr(C, packed)]
pub struct SequenceLookupRecord {
    sequence_index: BigEndian<u16>,
    lookup_list_index: BigEndian<u16>,
}

impl FixedSize for SequenceLookupRecord {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<Self>();
}

impl SequenceLookupRecord {
    pub fn sequence_index(&self) -> u16 {
        self.sequence_index.get()
    }

    pub fn lookup_list_index(&self) -> u16 {
        self.lookup_list_index.get()
    }
}

/// A contextual subtable, GSUB type 5 or GPOS type 7.
#[derive(Debug, Clone)]
pub enum SequenceContext<'a> {
    Format1(SequenceContextFormat1<'a>),
    Format2(SequenceContextFormat2<'a>),
    Format3(SequenceContextFormat3<'a>),
}

/// Glyph-sequence rules, one rule set per covered first glyph.
#[derive(Debug, Clone)]
pub struct SequenceContextFormat1<'a> {
    pub coverage: CoverageTable<'a>,
    /// Indexed by coverage index; `None` where the set offset is null.
    pub rule_sets: Vec<Option<Vec<SequenceRule<'a>>>>,
}

/// One glyph-sequence rule.
///
/// The first glyph of the sequence is the one matched by the coverage table;
/// `input` holds the remaining glyphs after it.
#[derive(Debug, Clone)]
pub struct SequenceRule<'a> {
    pub input: &'a [BigEndian<GlyphId16>],
    pub records: &'a [SequenceLookupRecord],
}

/// Class-sequence rules over a shared class definition.
#[derive(Debug, Clone)]
pub struct SequenceContextFormat2<'a> {
    pub coverage: CoverageTable<'a>,
    pub class_def: ClassDef<'a>,
    /// Indexed by the class of the first glyph.
    pub rule_sets: Vec<Option<Vec<ClassSequenceRule<'a>>>>,
}

/// Like [`SequenceRule`], with classes in place of glyph ids.
#[derive(Debug, Clone)]
pub struct ClassSequenceRule<'a> {
    pub input: &'a [BigEndian<u16>],
    pub records: &'a [SequenceLookupRecord],
}

/// A single rule given as one coverage table per input position.
#[derive(Debug, Clone)]
pub struct SequenceContextFormat3<'a> {
    pub coverages: Vec<CoverageTable<'a>>,
    pub records: &'a [SequenceLookupRecord],
}

impl<'a> TableRead<'a> for SequenceContext<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        match cursor.read::<u16>()? {
            1 => {
                let coverage = cursor.read::<Offset16>()?.resolve(data)?;
                let rule_sets = read_rule_sets(data, &mut cursor, SequenceRule::read)?;
                Ok(SequenceContext::Format1(SequenceContextFormat1 {
                    coverage,
                    rule_sets,
                }))
            }
            2 => {
                let coverage = cursor.read::<Offset16>()?.resolve(data)?;
                let class_def = cursor.read::<Offset16>()?.resolve(data)?;
                let rule_sets = read_rule_sets(data, &mut cursor, ClassSequenceRule::read)?;
                Ok(SequenceContext::Format2(SequenceContextFormat2 {
                    coverage,
                    class_def,
                    rule_sets,
                }))
            }
            3 => {
                let glyph_count: u16 = cursor.read()?;
                let record_count: u16 = cursor.read()?;
                let coverages = read_coverages(data, &mut cursor, glyph_count)?;
                let records = cursor.read_array(record_count as usize)?;
                Ok(SequenceContext::Format3(SequenceContextFormat3 {
                    coverages,
                    records,
                }))
            }
            other => Err(ReadError::InvalidFormat(other as _)),
        }
    }
}

impl<'a> SequenceContext<'a> {
    /// The coverage consulted for the first input glyph.
    pub fn primary_coverage(&self) -> Option<CoverageTable<'a>> {
        match self {
            SequenceContext::Format1(table) => Some(table.coverage),
            SequenceContext::Format2(table) => Some(table.coverage),
            SequenceContext::Format3(table) => table.coverages.first().copied(),
        }
    }
}

impl<'a> SequenceRule<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let glyph_count: u16 = cursor.read()?;
        let record_count: u16 = cursor.read()?;
        let rest = glyph_count
            .checked_sub(1)
            .ok_or(ReadError::MalformedData("empty input sequence in rule"))?;
        let input = cursor.read_array(rest as usize)?;
        let records = cursor.read_array(record_count as usize)?;
        Ok(SequenceRule { input, records })
    }
}

impl<'a> ClassSequenceRule<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let glyph_count: u16 = cursor.read()?;
        let record_count: u16 = cursor.read()?;
        let rest = glyph_count
            .checked_sub(1)
            .ok_or(ReadError::MalformedData("empty input sequence in rule"))?;
        let input = cursor.read_array(rest as usize)?;
        let records = cursor.read_array(record_count as usize)?;
        Ok(ClassSequenceRule { input, records })
    }
}

/// A chained contextual subtable, GSUB type 6 or GPOS type 8.
#[derive(Debug, Clone)]
pub enum ChainedSequenceContext<'a> {
    Format1(ChainedSequenceContextFormat1<'a>),
    Format2(ChainedSequenceContextFormat2<'a>),
    Format3(ChainedSequenceContextFormat3<'a>),
}

#[derive(Debug, Clone)]
pub struct ChainedSequenceContextFormat1<'a> {
    pub coverage: CoverageTable<'a>,
    pub rule_sets: Vec<Option<Vec<ChainedSequenceRule<'a>>>>,
}

/// A glyph-sequence rule with backtrack and lookahead context.
///
/// Backtrack glyphs are stored closest-first: `backtrack[0]` is the glyph
/// immediately before the input sequence.
#[derive(Debug, Clone)]
pub struct ChainedSequenceRule<'a> {
    pub backtrack: &'a [BigEndian<GlyphId16>],
    pub input: &'a [BigEndian<GlyphId16>],
    pub lookahead: &'a [BigEndian<GlyphId16>],
    pub records: &'a [SequenceLookupRecord],
}

/// Chained class rules over three class definitions, one per context part.
#[derive(Debug, Clone)]
pub struct ChainedSequenceContextFormat2<'a> {
    pub coverage: CoverageTable<'a>,
    /// `None` when the backtrack class-def offset is null (no backtrack
    /// classes are referenced by any rule).
    pub backtrack_classes: Option<ClassDef<'a>>,
    pub input_classes: ClassDef<'a>,
    pub lookahead_classes: Option<ClassDef<'a>>,
    pub rule_sets: Vec<Option<Vec<ChainedClassSequenceRule<'a>>>>,
}

#[derive(Debug, Clone)]
pub struct ChainedClassSequenceRule<'a> {
    pub backtrack: &'a [BigEndian<u16>],
    pub input: &'a [BigEndian<u16>],
    pub lookahead: &'a [BigEndian<u16>],
    pub records: &'a [SequenceLookupRecord],
}

/// A single chained rule given as coverage tables per position.
#[derive(Debug, Clone)]
pub struct ChainedSequenceContextFormat3<'a> {
    pub backtrack_coverages: Vec<CoverageTable<'a>>,
    pub input_coverages: Vec<CoverageTable<'a>>,
    pub lookahead_coverages: Vec<CoverageTable<'a>>,
    pub records: &'a [SequenceLookupRecord],
}

impl<'a> TableRead<'a> for ChainedSequenceContext<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        match cursor.read::<u16>()? {
            1 => {
                let coverage = cursor.read::<Offset16>()?.resolve(data)?;
                let rule_sets = read_rule_sets(data, &mut cursor, ChainedSequenceRule::read)?;
                Ok(ChainedSequenceContext::Format1(
                    ChainedSequenceContextFormat1 {
                        coverage,
                        rule_sets,
                    },
                ))
            }
            2 => {
                let coverage = cursor.read::<Offset16>()?.resolve(data)?;
                let backtrack_classes = read_nullable_class_def(data, &mut cursor)?;
                let input_classes = cursor.read::<Offset16>()?.resolve(data)?;
                let lookahead_classes = read_nullable_class_def(data, &mut cursor)?;
                let rule_sets = read_rule_sets(data, &mut cursor, ChainedClassSequenceRule::read)?;
                Ok(ChainedSequenceContext::Format2(
                    ChainedSequenceContextFormat2 {
                        coverage,
                        backtrack_classes,
                        input_classes,
                        lookahead_classes,
                        rule_sets,
                    },
                ))
            }
            3 => {
                let backtrack_count: u16 = cursor.read()?;
                let backtrack_coverages = read_coverages(data, &mut cursor, backtrack_count)?;
                let input_count: u16 = cursor.read()?;
                let input_coverages = read_coverages(data, &mut cursor, input_count)?;
                let lookahead_count: u16 = cursor.read()?;
                let lookahead_coverages = read_coverages(data, &mut cursor, lookahead_count)?;
                let record_count: u16 = cursor.read()?;
                let records = cursor.read_array(record_count as usize)?;
                Ok(ChainedSequenceContext::Format3(
                    ChainedSequenceContextFormat3 {
                        backtrack_coverages,
                        input_coverages,
                        lookahead_coverages,
                        records,
                    },
                ))
            }
            other => Err(ReadError::InvalidFormat(other as _)),
        }
    }
}

impl<'a> ChainedSequenceContext<'a> {
    /// The coverage consulted for the first input glyph.
    pub fn primary_coverage(&self) -> Option<CoverageTable<'a>> {
        match self {
            ChainedSequenceContext::Format1(table) => Some(table.coverage),
            ChainedSequenceContext::Format2(table) => Some(table.coverage),
            ChainedSequenceContext::Format3(table) => table.input_coverages.first().copied(),
        }
    }
}

impl<'a> ChainedSequenceRule<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let backtrack_count: u16 = cursor.read()?;
        let backtrack = cursor.read_array(backtrack_count as usize)?;
        let glyph_count: u16 = cursor.read()?;
        let rest = glyph_count
            .checked_sub(1)
            .ok_or(ReadError::MalformedData("empty input sequence in rule"))?;
        let input = cursor.read_array(rest as usize)?;
        let lookahead_count: u16 = cursor.read()?;
        let lookahead = cursor.read_array(lookahead_count as usize)?;
        let record_count: u16 = cursor.read()?;
        let records = cursor.read_array(record_count as usize)?;
        Ok(ChainedSequenceRule {
            backtrack,
            input,
            lookahead,
            records,
        })
    }
}

impl<'a> ChainedClassSequenceRule<'a> {
    fn read(data: Segment<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let backtrack_count: u16 = cursor.read()?;
        let backtrack = cursor.read_array(backtrack_count as usize)?;
        let glyph_count: u16 = cursor.read()?;
        let rest = glyph_count
            .checked_sub(1)
            .ok_or(ReadError::MalformedData("empty input sequence in rule"))?;
        let input = cursor.read_array(rest as usize)?;
        let lookahead_count: u16 = cursor.read()?;
        let lookahead = cursor.read_array(lookahead_count as usize)?;
        let record_count: u16 = cursor.read()?;
        let records = cursor.read_array(record_count as usize)?;
        Ok(ChainedClassSequenceRule {
            backtrack,
            input,
            lookahead,
            records,
        })
    }
}

/// Read a count-prefixed array of rule-set offsets, each a count-prefixed
/// array of rule offsets. Null set offsets are legal and yield `None`.
pub(crate) fn read_rule_sets<'a, T>(
    base: Segment<'a>,
    cursor: &mut Cursor<'a>,
    read_rule: fn(Segment<'a>) -> Result<T, ReadError>,
) -> Result<Vec<Option<Vec<T>>>, ReadError> {
    let count: u16 = cursor.read()?;
    let offsets: &[BigEndian<Offset16>] = cursor.read_array(count as usize)?;
    let mut sets = Vec::with_capacity(count as usize);
    for child in array::deep_nullable(base, offsets) {
        match child? {
            None => sets.push(None),
            Some(set_data) => {
                let rules = array::OffsetArray::read_from(set_data)?
                    .iter_deep()
                    .map(|rule| rule.and_then(read_rule))
                    .collect::<Result<Vec<_>, _>>()?;
                sets.push(Some(rules));
            }
        }
    }
    Ok(sets)
}

/// Read `count` coverage offsets and resolve each against `base`.
pub(crate) fn read_coverages<'a>(
    base: Segment<'a>,
    cursor: &mut Cursor<'a>,
    count: u16,
) -> Result<Vec<CoverageTable<'a>>, ReadError> {
    let offsets: &[BigEndian<Offset16>] = cursor.read_array(count as usize)?;
    array::deep(base, offsets)
        .map(|child| child.and_then(CoverageTable::read))
        .collect()
}

pub(crate) fn read_nullable_class_def<'a>(
    base: Segment<'a>,
    cursor: &mut Cursor<'a>,
) -> Result<Option<ClassDef<'a>>, ReadError> {
    match cursor.read::<Offset16>()?.non_null() {
        None => Ok(None),
        Some(pos) => base
            .jump(pos)
            .ok_or(ReadError::OutOfBounds)
            .and_then(ClassDef::read)
            .map(Some),
    }
}

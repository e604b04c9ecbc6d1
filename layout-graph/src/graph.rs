//! The lazy lookup graph
//!
//! A GSUB or GPOS table is a tree of 16-bit offsets: a lookup list pointing
//! at lookups pointing at subtables, with extension subtables adding one
//! 32-bit indirection. Fonts routinely carry thousands of lookups, most of
//! which a given shaping run never touches, so the graph materializes them
//! on first access only.
//!
//! Each lookup and each subtable occupies one [`OnceLock`] slot: the first
//! reader to touch a slot runs the decode, every other reader waits for it
//! and then observes the same, fully constructed value. Repeated access
//! returns the identical object, and a failed decode is cached the same way
//! a successful one is, as a node carrying its error.

use std::sync::OnceLock;

use crate::types::{BigEndian, Offset16, Tag};

use crate::error::{Diagnostics, ErrorCollector, FontError, FontWarning, Severity};
use crate::offset::Offset;
use crate::read::ReadError;
use crate::segment::Segment;
use crate::tables::gpos::{self, GposPayload};
use crate::tables::gsub::{self, GsubPayload};
use crate::tables::layout::{CoverageTable, LookupFlag};

#[cfg(test)]
#[path = "tests/test_graph.rs"]
mod tests;

/// Which layout table a graph was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Gsub,
    Gpos,
}

impl TableKind {
    pub fn tag(self) -> Tag {
        match self {
            TableKind::Gsub => Tag::new(b"GSUB"),
            TableKind::Gpos => Tag::new(b"GPOS"),
        }
    }

    /// The lookup type that marks an extension wrapper in this table.
    pub(crate) fn extension_type(self) -> u16 {
        match self {
            TableKind::Gsub => 7,
            TableKind::Gpos => 9,
        }
    }

    pub(crate) fn max_lookup_type(self) -> u16 {
        match self {
            TableKind::Gsub => 8,
            TableKind::Gpos => 9,
        }
    }
}

/// Lookup types on the wire are 16 bits but only the low byte is meaningful;
/// some producers set marker bits in the high byte. The mask is applied once,
/// at the lookup-table boundary, so everything downstream sees canonical
/// codes.
const CANONICAL_TYPE_MASK: u16 = 0x00ff;

/// Extension subtables may not reference extension subtables, so one level
/// of indirection is all a conforming font can have. The bound is a
/// parameter of the node parser only so tests can exercise it.
pub(crate) const MAX_EXTENSION_DEPTH: u8 = 1;

/// The byte offset where the lookup-list offset lives in a GSUB/GPOS header.
const LOOKUP_LIST_OFFSET_POS: usize = 8;

const SECTION_HEADER: &str = "header";
const SECTION_LOOKUP_LIST: &str = "lookup list";
const SECTION_LOOKUP: &str = "lookup table";

/// The root of a GSUB or GPOS lookup graph.
///
/// Construction reads and validates only the lookup offset array; lookups
/// and their subtables are parsed on first access, concurrently-safe, at
/// most once per slot.
pub struct LookupListGraph<'a> {
    data: Segment<'a>,
    kind: TableKind,
    offsets: &'a [BigEndian<Offset16>],
    slots: Vec<OnceLock<LookupTable<'a>>>,
    error: Option<FontError>,
}

impl<'a> LookupListGraph<'a> {
    /// Root a graph in a whole font blob, given the table's location.
    ///
    /// Peeks at the table header just enough to find the lookup list:
    /// version 1.0 and 1.1 headers are accepted, and the 1.1
    /// featureVariations offset is ignored. Script and feature lists are
    /// not this crate's concern.
    pub fn for_table(
        blob: &'a [u8],
        offset: usize,
        length: usize,
        kind: TableKind,
        collector: &mut ErrorCollector,
    ) -> Self {
        let table_bytes = offset
            .checked_add(length)
            .and_then(|end| blob.get(offset..end));
        let Some(table_bytes) = table_bytes else {
            let error = FontError::new(
                kind.tag(),
                SECTION_HEADER,
                ReadError::OutOfBounds,
                Severity::Critical,
                offset as u32,
            );
            collector.record(error.clone());
            return Self::unusable(kind, error);
        };
        let data = Segment::with_origin(table_bytes, offset as u32);
        match Self::peek_lookup_list(data, kind, collector) {
            Ok(list) => Self::new(list, kind, collector),
            Err(error) => {
                collector.record(error.clone());
                Self::unusable(kind, error)
            }
        }
    }

    fn peek_lookup_list(
        data: Segment<'a>,
        kind: TableKind,
        collector: &mut ErrorCollector,
    ) -> Result<Segment<'a>, FontError> {
        let header = |issue, severity| {
            FontError::new(kind.tag(), SECTION_HEADER, issue, severity, data.origin())
        };
        let major: u16 = data
            .read_at(0)
            .map_err(|issue| header(issue, Severity::Critical))?;
        let minor: u16 = data
            .read_at(2)
            .map_err(|issue| header(issue, Severity::Critical))?;
        if major != 1 {
            return Err(header(
                ReadError::UnsupportedVersion(major),
                Severity::Critical,
            ));
        }
        if minor > 1 {
            collector.warn(FontWarning {
                table: kind.tag(),
                issue: "minor version newer than 1.1",
                offset: data.origin(),
            });
        }
        let list_offset: Offset16 = data
            .read_at(LOOKUP_LIST_OFFSET_POS)
            .map_err(|issue| header(issue, Severity::Critical))?;
        list_offset
            .non_null()
            .ok_or_else(|| header(ReadError::NullOffset, Severity::Critical))
            .and_then(|pos| {
                data.jump(pos)
                    .ok_or_else(|| header(ReadError::OutOfBounds, Severity::Critical))
            })
    }

    /// Root a graph directly at a lookup list segment.
    pub fn new(data: Segment<'a>, kind: TableKind, collector: &mut ErrorCollector) -> Self {
        let mut cursor = data.cursor();
        let offsets: &[BigEndian<Offset16>] = match cursor
            .read::<u16>()
            .and_then(|count| cursor.read_array(count as usize))
        {
            Ok(offsets) => offsets,
            Err(issue) => {
                let error = FontError::new(
                    kind.tag(),
                    SECTION_LOOKUP_LIST,
                    issue,
                    Severity::Critical,
                    data.origin(),
                );
                collector.record(error.clone());
                return Self::unusable(kind, error);
            }
        };
        let mut error = None;
        for (i, offset) in offsets.iter().enumerate() {
            let raw = offset.get().to_usize();
            let issue = match raw {
                0 => ReadError::NullOffset,
                pos if pos >= data.len() => ReadError::OutOfBounds,
                _ => continue,
            };
            let record = FontError::new(
                kind.tag(),
                SECTION_LOOKUP_LIST,
                issue,
                Severity::Critical,
                data.origin().saturating_add(2 + 2 * i as u32),
            );
            collector.record(record.clone());
            error.get_or_insert(record);
        }
        let slots = std::iter::repeat_with(OnceLock::new)
            .take(offsets.len())
            .collect();
        LookupListGraph {
            data,
            kind,
            offsets,
            slots,
            error,
        }
    }

    fn unusable(kind: TableKind, error: FontError) -> Self {
        LookupListGraph {
            data: Segment::EMPTY,
            kind,
            offsets: &[],
            slots: Vec::new(),
            error: Some(error),
        }
    }

    /// The number of lookups in the list.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// The lookup at `index`, or `None` if the index is out of range.
    ///
    /// The first call for a given index parses the lookup; every call,
    /// from any thread, returns the same object. A lookup whose offset or
    /// header is bad is still materialized, carrying its error.
    pub fn lookup(&self, index: usize) -> Option<&LookupTable<'a>> {
        let slot = self.slots.get(index)?;
        Some(slot.get_or_init(|| {
            LookupTable::parse(self.data, self.offsets[index].get(), self.kind)
        }))
    }

    /// Iterate `(index, lookup)` pairs in declaration order, materializing
    /// lazily.
    pub fn range(&self) -> impl Iterator<Item = (usize, &LookupTable<'a>)> + '_ {
        (0..self.slots.len()).filter_map(move |i| self.lookup(i).map(|lookup| (i, lookup)))
    }

    /// The top-level error, if construction recorded one.
    pub fn error(&self) -> Option<&FontError> {
        self.error.as_ref()
    }
}

/// One lookup: its header, plus lazily materialized subtables.
pub struct LookupTable<'a> {
    data: Segment<'a>,
    kind: TableKind,
    lookup_type: u16,
    flag: LookupFlag,
    mark_filtering_set: Option<u16>,
    subtable_offsets: &'a [BigEndian<Offset16>],
    slots: Vec<OnceLock<LookupNode<'a>>>,
    error: Option<FontError>,
}

impl<'a> LookupTable<'a> {
    fn parse(list_data: Segment<'a>, offset: Offset16, kind: TableKind) -> Self {
        let origin = list_data.origin();
        let data = match offset.non_null() {
            None => {
                return Self::unusable(kind, ReadError::NullOffset, origin);
            }
            Some(pos) => match list_data.jump(pos) {
                Some(data) => data,
                None => return Self::unusable(kind, ReadError::OutOfBounds, origin),
            },
        };
        match Self::parse_header(data, kind) {
            Ok(lookup) => lookup,
            Err(issue) => Self::unusable(kind, issue, data.origin()),
        }
    }

    fn parse_header(data: Segment<'a>, kind: TableKind) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let raw_type: u16 = cursor.read()?;
        let flag = LookupFlag::from_bits_truncate(cursor.read()?);
        let count: u16 = cursor.read()?;
        let subtable_offsets: &[BigEndian<Offset16>] = cursor.read_array(count as usize)?;
        let mark_filtering_set = flag
            .uses_mark_filtering_set()
            .then(|| cursor.read::<u16>())
            .transpose()?;
        let lookup_type = raw_type & CANONICAL_TYPE_MASK;
        if lookup_type == 0 || lookup_type > kind.max_lookup_type() {
            return Err(ReadError::InvalidLookupType(raw_type));
        }
        let slots = std::iter::repeat_with(OnceLock::new)
            .take(subtable_offsets.len())
            .collect();
        Ok(LookupTable {
            data,
            kind,
            lookup_type,
            flag,
            mark_filtering_set,
            subtable_offsets,
            slots,
            error: None,
        })
    }

    fn unusable(kind: TableKind, issue: ReadError, offset: u32) -> Self {
        let error = FontError::new(kind.tag(), SECTION_LOOKUP, issue, Severity::Critical, offset);
        log::debug!("{error}");
        LookupTable {
            data: Segment::EMPTY,
            kind,
            lookup_type: 0,
            flag: LookupFlag::empty(),
            mark_filtering_set: None,
            subtable_offsets: &[],
            slots: Vec::new(),
            error: Some(error),
        }
    }

    /// The canonical lookup type, 1..=8 for GSUB and 1..=9 for GPOS.
    pub fn lookup_type(&self) -> u16 {
        self.lookup_type
    }

    pub fn flag(&self) -> LookupFlag {
        self.flag
    }

    /// The mark filtering set index, present iff the flag requests one.
    pub fn mark_filtering_set(&self) -> Option<u16> {
        self.mark_filtering_set
    }

    pub fn subtable_count(&self) -> usize {
        self.slots.len()
    }

    /// The subtable at `index`, or `None` if the index is out of range.
    ///
    /// Same laziness and sharing contract as
    /// [`LookupListGraph::lookup`].
    pub fn subtable(&self, index: usize) -> Option<&LookupNode<'a>> {
        let slot = self.slots.get(index)?;
        Some(slot.get_or_init(|| {
            LookupNode::parse_at(
                self.data,
                self.subtable_offsets[index].get(),
                self.kind,
                self.lookup_type,
            )
        }))
    }

    /// Iterate `(index, subtable)` pairs in declaration order.
    pub fn range(&self) -> impl Iterator<Item = (usize, &LookupNode<'a>)> + '_ {
        (0..self.slots.len()).filter_map(move |i| self.subtable(i).map(|node| (i, node)))
    }

    pub fn error(&self) -> Option<&FontError> {
        self.error.as_ref()
    }
}

/// The typed payload of a subtable.
#[derive(Debug, Clone, Default)]
pub enum Payload<'a> {
    /// The subtable failed to decode; see the node's error.
    #[default]
    None,
    Gsub(GsubPayload<'a>),
    Gpos(GposPayload<'a>),
}

/// An extension wrapper, decoded through to the inner subtable.
///
/// The resolved node may itself carry an error when the 32-bit offset points
/// at something unreadable; the wrapper mirrors that error so callers that
/// only check the outer node still see it.
#[derive(Debug, Clone)]
pub struct ExtensionSubtable<'a> {
    /// The inner lookup type the wrapper forwards to.
    pub resolved_type: u16,
    pub resolved: Box<LookupNode<'a>>,
}

/// One parsed subtable: shared header fields plus the typed payload.
///
/// A node always materializes, even when its bytes are bad; check
/// [`error`](Self::error) before trusting the payload. An errored node may
/// still expose best-effort fields.
#[derive(Debug, Clone)]
pub struct LookupNode<'a> {
    data: Segment<'a>,
    lookup_type: u16,
    format: u16,
    coverage: Option<CoverageTable<'a>>,
    payload: Payload<'a>,
    error: Option<FontError>,
}

impl<'a> LookupNode<'a> {
    fn parse_at(
        lookup_data: Segment<'a>,
        offset: Offset16,
        kind: TableKind,
        lookup_type: u16,
    ) -> Self {
        let section = section_name(kind, lookup_type);
        let data = match offset.non_null() {
            None => {
                return Self::unusable(
                    lookup_type,
                    ReadError::NullOffset,
                    Severity::Critical,
                    kind.tag(),
                    section,
                    lookup_data.origin(),
                );
            }
            Some(pos) => match lookup_data.jump(pos) {
                Some(data) => data,
                None => {
                    return Self::unusable(
                        lookup_type,
                        ReadError::OutOfBounds,
                        Severity::Critical,
                        kind.tag(),
                        section,
                        lookup_data.origin(),
                    );
                }
            },
        };
        Self::parse(data, kind, lookup_type, MAX_EXTENSION_DEPTH)
    }

    pub(crate) fn parse(
        data: Segment<'a>,
        kind: TableKind,
        lookup_type: u16,
        depth: u8,
    ) -> Self {
        if lookup_type == kind.extension_type() {
            return Self::parse_extension(data, kind, depth);
        }
        let table = kind.tag();
        let section = section_name(kind, lookup_type);
        let mut notes = Diagnostics::default();
        let decoded = match kind {
            TableKind::Gsub => gsub::decode(data, lookup_type, table, &mut notes)
                .map(|decoded| decoded.map_payload(Payload::Gsub)),
            TableKind::Gpos => gpos::decode(data, lookup_type, table, &mut notes)
                .map(|decoded| decoded.map_payload(Payload::Gpos)),
        };
        match decoded {
            Ok(decoded) => {
                if let Some(coverage) = &decoded.coverage {
                    if let Err(issue) = coverage.sanity_check() {
                        notes.note(FontError::new(
                            table,
                            section,
                            issue,
                            Severity::Major,
                            data.origin(),
                        ));
                    }
                }
                LookupNode {
                    data,
                    lookup_type,
                    format: decoded.format,
                    coverage: decoded.coverage,
                    payload: decoded.payload,
                    error: notes.into_worst(),
                }
            }
            Err(issue) => Self::unusable(
                lookup_type,
                issue,
                payload_severity(&issue),
                table,
                section,
                data.origin(),
            ),
        }
    }

    /// Decode an extension wrapper and, through it, the inner subtable.
    ///
    /// The wrapper's own fields failing to parse, an inner type equal to
    /// the extension type, or an exhausted depth budget are all critical:
    /// the payload stays absent. An inner subtable that parses badly is a
    /// different case: the wrapper materializes with the errored inner node
    /// and mirrors its error.
    fn parse_extension(data: Segment<'a>, kind: TableKind, depth: u8) -> Self {
        let extension_type = kind.extension_type();
        let table = kind.tag();
        let section = section_name(kind, extension_type);
        let unwrap_inner = || -> Result<(u16, Segment<'a>), ReadError> {
            let format: u16 = data.read_at(0)?;
            if format != 1 {
                return Err(ReadError::InvalidFormat(format as _));
            }
            let raw_inner: u16 = data.read_at(2)?;
            let inner_type = raw_inner & CANONICAL_TYPE_MASK;
            if inner_type == extension_type {
                return Err(ReadError::NestedExtension);
            }
            if inner_type == 0 || inner_type > kind.max_lookup_type() {
                return Err(ReadError::InvalidLookupType(raw_inner));
            }
            if depth == 0 {
                return Err(ReadError::RecursionLimit);
            }
            let offset: u32 = data.read_at(4)?;
            let inner_data = match offset {
                0 => return Err(ReadError::NullOffset),
                pos => data.jump(pos as usize).ok_or(ReadError::OutOfBounds)?,
            };
            Ok((inner_type, inner_data))
        };
        match unwrap_inner() {
            Ok((inner_type, inner_data)) => {
                let resolved = Self::parse(inner_data, kind, inner_type, depth - 1);
                let error = resolved.error.clone();
                let extension = ExtensionSubtable {
                    resolved_type: inner_type,
                    resolved: Box::new(resolved),
                };
                let payload = match kind {
                    TableKind::Gsub => Payload::Gsub(GsubPayload::Extension(extension)),
                    TableKind::Gpos => Payload::Gpos(GposPayload::Extension(extension)),
                };
                LookupNode {
                    data,
                    lookup_type: extension_type,
                    format: 1,
                    coverage: None,
                    payload,
                    error,
                }
            }
            Err(issue) => Self::unusable(
                extension_type,
                issue,
                structural_severity(&issue),
                table,
                section,
                data.origin(),
            ),
        }
    }

    fn unusable(
        lookup_type: u16,
        issue: ReadError,
        severity: Severity,
        table: Tag,
        section: &'static str,
        offset: u32,
    ) -> Self {
        let error = FontError::new(table, section, issue, severity, offset);
        log::debug!("{error}");
        LookupNode {
            data: Segment::EMPTY,
            lookup_type,
            format: 0,
            coverage: None,
            payload: Payload::None,
            error: Some(error),
        }
    }

    /// The canonical lookup type this node decodes.
    pub fn lookup_type(&self) -> u16 {
        self.lookup_type
    }

    /// The subtable format code; 0 when the format byte itself was
    /// unreadable.
    pub fn format(&self) -> u16 {
        self.format
    }

    /// The node whose payload is the operative one: `self`, unless this is
    /// an extension wrapper, in which case the resolved inner node.
    ///
    /// Iteration code uses this to stay extension-agnostic.
    pub fn effective(&self) -> &LookupNode<'a> {
        match self.extension() {
            Some(extension) => &extension.resolved,
            None => self,
        }
    }

    /// The subtable's primary coverage.
    ///
    /// Extension wrappers have no coverage of their own; this follows the
    /// resolved node, so it is already extension-transparent.
    pub fn coverage(&self) -> Option<&CoverageTable<'a>> {
        self.effective().coverage.as_ref()
    }

    /// The typed payload, when this node came from a GSUB graph.
    pub fn gsub_payload(&self) -> Option<&GsubPayload<'a>> {
        match &self.payload {
            Payload::Gsub(payload) => Some(payload),
            _ => None,
        }
    }

    /// The typed payload, when this node came from a GPOS graph.
    pub fn gpos_payload(&self) -> Option<&GposPayload<'a>> {
        match &self.payload {
            Payload::Gpos(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn payload(&self) -> &Payload<'a> {
        &self.payload
    }

    /// The raw segment this node was decoded from.
    pub fn offset_data(&self) -> Segment<'a> {
        self.data
    }

    pub fn error(&self) -> Option<&FontError> {
        self.error.as_ref()
    }

    fn extension(&self) -> Option<&ExtensionSubtable<'a>> {
        match &self.payload {
            Payload::Gsub(GsubPayload::Extension(extension)) => Some(extension),
            Payload::Gpos(GposPayload::Extension(extension)) => Some(extension),
            _ => None,
        }
    }
}

/// The intermediate result of a payload decode: the format code, the
/// primary coverage, and the typed payload.
pub(crate) struct Decoded<'a, P> {
    pub(crate) format: u16,
    pub(crate) coverage: Option<CoverageTable<'a>>,
    pub(crate) payload: P,
}

impl<'a, P> Decoded<'a, P> {
    fn map_payload<Q>(self, wrap: impl FnOnce(P) -> Q) -> Decoded<'a, Q> {
        Decoded {
            format: self.format,
            coverage: self.coverage,
            payload: wrap(self.payload),
        }
    }
}

/// Severity of a failure in subtable payload data: bounds overruns degrade
/// one subtable, structural violations make it unusable.
fn payload_severity(issue: &ReadError) -> Severity {
    match issue {
        ReadError::OutOfBounds | ReadError::InvalidArrayLen | ReadError::MalformedData(_) => {
            Severity::Major
        }
        _ => Severity::Critical,
    }
}

/// Severity of a failure in the extension wrapper itself; everything there
/// is structural.
fn structural_severity(issue: &ReadError) -> Severity {
    match issue {
        ReadError::OutOfBounds => Severity::Major,
        _ => Severity::Critical,
    }
}

fn section_name(kind: TableKind, lookup_type: u16) -> &'static str {
    match (kind, lookup_type) {
        (TableKind::Gsub, 1) => "SingleSubst",
        (TableKind::Gsub, 2) => "MultipleSubst",
        (TableKind::Gsub, 3) => "AlternateSubst",
        (TableKind::Gsub, 4) => "LigatureSubst",
        (TableKind::Gsub, 5) | (TableKind::Gpos, 7) => "SequenceContext",
        (TableKind::Gsub, 6) | (TableKind::Gpos, 8) => "ChainedSequenceContext",
        (TableKind::Gsub, 7) => "ExtensionSubst",
        (TableKind::Gsub, 8) => "ReverseChainSingleSubst",
        (TableKind::Gpos, 1) => "SinglePos",
        (TableKind::Gpos, 2) => "PairPos",
        (TableKind::Gpos, 3) => "CursivePos",
        (TableKind::Gpos, 4) => "MarkBasePos",
        (TableKind::Gpos, 5) => "MarkLigPos",
        (TableKind::Gpos, 6) => "MarkMarkPos",
        (TableKind::Gpos, 9) => "ExtensionPos",
        _ => "subtable",
    }
}

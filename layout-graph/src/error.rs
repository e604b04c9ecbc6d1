//! Severity-tagged parse diagnostics
//!
//! Low-level readers report failures as [`ReadError`]; this module layers the
//! table/section/position context on top and accumulates the results, so a
//! damaged font can be diagnosed without aborting the parse of everything
//! else in it.

use crate::types::Tag;

use crate::read::ReadError;

/// How bad a recorded issue is.
///
/// `Critical` means the containing table is unusable; `Major` means partial
/// degradation (one lookup or one rule lost); `Minor` is cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Minor,
    Major,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Minor => write!(f, "minor"),
            Severity::Major => write!(f, "major"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

/// A parse issue, located by table, section and absolute byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontError {
    /// The table being parsed, `GSUB` or `GPOS`.
    pub table: Tag,
    /// The structure within the table, e.g. `"lookup list"` or `"PairPos"`.
    pub section: &'static str,
    /// The underlying read failure.
    pub issue: ReadError,
    pub severity: Severity,
    /// Byte offset of the affected structure from the start of the font blob.
    pub offset: u32,
}

impl FontError {
    pub(crate) fn new(
        table: Tag,
        section: &'static str,
        issue: ReadError,
        severity: Severity,
        offset: u32,
    ) -> Self {
        FontError {
            table,
            section,
            issue,
            severity,
            offset,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

impl std::fmt::Display for FontError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} in {} at 0x{:04x}: {}",
            self.severity, self.table, self.section, self.offset, self.issue
        )
    }
}

impl std::error::Error for FontError {}

/// A non-fatal observation that is not tied to a specific structure failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontWarning {
    pub table: Tag,
    pub issue: &'static str,
    pub offset: u32,
}

impl std::fmt::Display for FontWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at 0x{:04x}: {}", self.table, self.offset, self.issue)
    }
}

/// Accumulates diagnostics for one table parse.
///
/// The collector is only written during the initial, single-threaded
/// construction of a lookup graph. Failures discovered later, inside lazily
/// materialized lookups and subtables, are stored on the node that failed
/// (see [`error()`](crate::graph::LookupNode::error)) so that materialization
/// stays lock-free for readers.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<FontError>,
    warnings: Vec<FontWarning>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Default::default()
    }

    pub(crate) fn record(&mut self, error: FontError) {
        match error.severity {
            Severity::Critical => log::warn!("{error}"),
            _ => log::debug!("{error}"),
        }
        self.errors.push(error);
    }

    pub(crate) fn warn(&mut self, warning: FontWarning) {
        log::debug!("{warning}");
        self.warnings.push(warning);
    }

    /// All recorded errors, in the order they were encountered.
    pub fn errors(&self) -> &[FontError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[FontWarning] {
        &self.warnings
    }

    /// The critical errors only.
    pub fn criticals(&self) -> impl Iterator<Item = &FontError> + '_ {
        self.errors.iter().filter(|err| err.is_critical())
    }

    /// The highest severity seen so far, if anything was recorded.
    pub fn worst(&self) -> Option<Severity> {
        self.errors.iter().map(|err| err.severity).max()
    }

    pub fn has_critical(&self) -> bool {
        self.errors.iter().any(FontError::is_critical)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Collects the worst issue seen while decoding a single subtable.
///
/// Payload parsers push non-fatal (`Major`/`Minor`) observations here; the
/// node decode wrapper merges the result with any fatal error into the one
/// diagnostic the node carries.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    worst: Option<FontError>,
}

impl Diagnostics {
    pub(crate) fn note(&mut self, error: FontError) {
        match &self.worst {
            Some(current) if current.severity >= error.severity => {}
            _ => self.worst = Some(error),
        }
    }

    pub(crate) fn into_worst(self) -> Option<FontError> {
        self.worst
    }
}

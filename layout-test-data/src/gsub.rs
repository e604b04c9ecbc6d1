//! GSUB subtable and table fixtures.

use crate::{be_buffer, bebuffer::BeBuffer};

/// Single substitution format 1: coverage {5}, delta +3.
#[rustfmt::skip]
pub static SINGLESUBSTFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   substFormat
    0x00, 0x06,             // Offset16 coverageOffset
    0x00, 0x03,             // int16    deltaGlyphID
    // coverage (offset 0x06)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x05,             // uint16   glyphArray[0] (5)
];

/// Single substitution format 2: 16 -> 66, 17 -> 67.
#[rustfmt::skip]
pub static SINGLESUBSTFORMAT2: &[u8] = &[
    0x00, 0x02,             // uint16   substFormat
    0x00, 0x0A,             // Offset16 coverageOffset
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x42,             // uint16   substituteGlyphIDs[0] (66)
    0x00, 0x43,             // uint16   substituteGlyphIDs[1] (67)
    // coverage (offset 0x0A)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x10,             // uint16   glyphArray[0] (16)
    0x00, 0x11,             // uint16   glyphArray[1] (17)
];

/// Multiple substitution: 5 -> 6 7.
#[rustfmt::skip]
pub static MULTIPLESUBSTFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   substFormat
    0x00, 0x08,             // Offset16 coverageOffset
    0x00, 0x01,             // uint16   sequenceCount
    0x00, 0x0E,             // Offset16 sequenceOffsets[0]
    // coverage (offset 0x08)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x05,             // uint16   glyphArray[0] (5)
    // Sequence (offset 0x0E)
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x06,             // uint16   substituteGlyphIDs[0] (6)
    0x00, 0x07,             // uint16   substituteGlyphIDs[1] (7)
];

/// Alternate substitution: 9 -> {48, 49}.
#[rustfmt::skip]
pub static ALTERNATESUBSTFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   substFormat
    0x00, 0x08,             // Offset16 coverageOffset
    0x00, 0x01,             // uint16   alternateSetCount
    0x00, 0x0E,             // Offset16 alternateSetOffsets[0]
    // coverage (offset 0x08)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x09,             // uint16   glyphArray[0] (9)
    // AlternateSet (offset 0x0E)
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x30,             // uint16   alternateGlyphIDs[0] (48)
    0x00, 0x31,             // uint16   alternateGlyphIDs[1] (49)
];

/// Ligature substitution: 15 16 -> 100.
#[rustfmt::skip]
pub static LIGATURESUBSTFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   substFormat
    0x00, 0x08,             // Offset16 coverageOffset
    0x00, 0x01,             // uint16   ligatureSetCount
    0x00, 0x0E,             // Offset16 ligatureSetOffsets[0]
    // coverage (offset 0x08)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x0F,             // uint16   glyphArray[0] (15)
    // LigatureSet (offset 0x0E)
    0x00, 0x01,             // uint16   ligatureCount
    0x00, 0x04,             // Offset16 ligatureOffsets[0]
    // Ligature (set offset 0x04)
    0x00, 0x64,             // uint16   ligatureGlyph (100)
    0x00, 0x02,             // uint16   componentCount
    0x00, 0x10,             // uint16   componentGlyphIDs[0] (16)
];

/// Reverse chained single substitution: 10 -> 99 between 11 and 12.
#[rustfmt::skip]
pub static REVERSECHAINSINGLESUBSTFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   substFormat
    0x00, 0x10,             // Offset16 coverageOffset
    0x00, 0x01,             // uint16   backtrackGlyphCount
    0x00, 0x16,             // Offset16 backtrackCoverageOffsets[0]
    0x00, 0x01,             // uint16   lookaheadGlyphCount
    0x00, 0x1C,             // Offset16 lookaheadCoverageOffsets[0]
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x63,             // uint16   substituteGlyphIDs[0] (99)
    // coverage (offset 0x10)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x0A,             // uint16   glyphArray[0] (10)
    // backtrack coverage (offset 0x16)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x0B,             // uint16   glyphArray[0] (11)
    // lookahead coverage (offset 0x1C)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x0C,             // uint16   glyphArray[0] (12)
];

/// An extension wrapper forwarding to the single substitution above.
#[rustfmt::skip]
pub static EXTENSIONSUBSTFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   substFormat
    0x00, 0x01,             // uint16   extensionLookupType (single subst)
    0x00, 0x00, 0x00, 0x08, // Offset32 extensionOffset
    // wrapped single substitution format 1 (offset 0x08)
    0x00, 0x01,             // uint16   substFormat
    0x00, 0x06,             // Offset16 coverageOffset
    0x00, 0x03,             // int16    deltaGlyphID
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x05,             // uint16   glyphArray[0] (5)
];

/// An extension wrapper whose inner lookup type is again the extension
/// type; structurally forbidden.
#[rustfmt::skip]
pub static EXTENSIONSUBSTFORMAT1_NESTED: &[u8] = &[
    0x00, 0x01,             // uint16   substFormat
    0x00, 0x07,             // uint16   extensionLookupType (extension!)
    0x00, 0x00, 0x00, 0x08, // Offset32 extensionOffset
];

/// A whole GSUB table: lookup 0 is a single substitution (5 -> 8), lookup 1
/// wraps the same kind of subtable (7 -> 10) in an extension.
pub fn gsub_graph() -> BeBuffer {
    be_buffer! {
        // GSUB header
        1_u16,              // majorVersion
        0_u16,              // minorVersion
        0_u16,              // scriptListOffset (unused here)
        0_u16,              // featureListOffset (unused here)
        10_u16,             // lookupListOffset
        // LookupList (offset 10)
        2_u16,              // lookupCount
        6_u16,              // lookupOffsets[0]
        26_u16,             // lookupOffsets[1]
        // Lookup 0 (list offset 6)
        1_u16,              // lookupType (single subst)
        0_u16,              // lookupFlag
        1_u16,              // subTableCount
        8_u16,              // subtableOffsets[0]
        // single subst format 1 (lookup offset 8)
        1_u16,              // substFormat
        6_u16,              // coverageOffset
        3_u16,              // deltaGlyphID
        1_u16,              // coverageFormat
        1_u16,              // glyphCount
        5_u16,              // glyphArray[0]
        // Lookup 1 (list offset 26)
        7_u16,              // lookupType (extension)
        0_u16,              // lookupFlag
        1_u16,              // subTableCount
        8_u16,              // subtableOffsets[0]
        // extension wrapper (lookup offset 8)
        1_u16,              // substFormat
        1_u16,              // extensionLookupType
        8_u32,              // extensionOffset
        // wrapped single subst format 1 (wrapper offset 8)
        1_u16,              // substFormat
        6_u16,              // coverageOffset
        3_u16,              // deltaGlyphID
        1_u16,              // coverageFormat
        1_u16,              // glyphCount
        7_u16               // glyphArray[0]
    }
}

/// A GSUB table whose lookup list contains one null and one out-of-bounds
/// lookup offset.
pub fn gsub_graph_bad_offsets() -> BeBuffer {
    be_buffer! {
        // GSUB header
        1_u16,              // majorVersion
        0_u16,              // minorVersion
        0_u16,              // scriptListOffset
        0_u16,              // featureListOffset
        10_u16,             // lookupListOffset
        // LookupList (offset 10)
        2_u16,              // lookupCount
        0_u16,              // lookupOffsets[0] (null)
        0x7fff_u16          // lookupOffsets[1] (out of bounds)
    }
}

/// A GSUB table with one lookup using a mark filtering set.
pub fn gsub_graph_mark_filtering() -> BeBuffer {
    be_buffer! {
        // GSUB header
        1_u16,              // majorVersion
        0_u16,              // minorVersion
        0_u16,              // scriptListOffset
        0_u16,              // featureListOffset
        10_u16,             // lookupListOffset
        // LookupList (offset 10)
        1_u16,              // lookupCount
        4_u16,              // lookupOffsets[0]
        // Lookup 0 (list offset 4)
        1_u16,              // lookupType (single subst)
        0x0010_u16,         // lookupFlag (USE_MARK_FILTERING_SET)
        1_u16,              // subTableCount
        10_u16,             // subtableOffsets[0]
        2_u16,              // markFilteringSet
        // single subst format 1 (lookup offset 10)
        1_u16,              // substFormat
        6_u16,              // coverageOffset
        1_u16,              // deltaGlyphID
        1_u16,              // coverageFormat
        1_u16,              // glyphCount
        5_u16               // glyphArray[0]
    }
}

//! GPOS subtable and table fixtures.

use crate::{be_buffer, bebuffer::BeBuffer};

/// Single positioning format 1: x-advance +7 for glyph 10.
#[rustfmt::skip]
pub static SINGLEPOSFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   posFormat
    0x00, 0x08,             // Offset16 coverageOffset
    0x00, 0x04,             // uint16   valueFormat (X_ADVANCE)
    0x00, 0x07,             // int16    valueRecord.xAdvance
    // coverage (offset 0x08)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x0A,             // uint16   glyphArray[0] (10)
];

/// Single positioning format 2: x-advance +7 for glyph 10, +9 for glyph 11.
#[rustfmt::skip]
pub static SINGLEPOSFORMAT2: &[u8] = &[
    0x00, 0x02,             // uint16   posFormat
    0x00, 0x0C,             // Offset16 coverageOffset
    0x00, 0x04,             // uint16   valueFormat (X_ADVANCE)
    0x00, 0x02,             // uint16   valueCount
    0x00, 0x07,             // int16    valueRecords[0].xAdvance
    0x00, 0x09,             // int16    valueRecords[1].xAdvance
    // coverage (offset 0x0C)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x0A,             // uint16   glyphArray[0] (10)
    0x00, 0x0B,             // uint16   glyphArray[1] (11)
];

/// Pair positioning format 1: (45, 89) kerned -30 on the first glyph.
#[rustfmt::skip]
pub static PAIRPOSFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   posFormat
    0x00, 0x0C,             // Offset16 coverageOffset
    0x00, 0x04,             // uint16   valueFormat1 (X_ADVANCE)
    0x00, 0x00,             // uint16   valueFormat2
    0x00, 0x01,             // uint16   pairSetCount
    0x00, 0x12,             // Offset16 pairSetOffsets[0]
    // coverage (offset 0x0C)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x2D,             // uint16   glyphArray[0] (45)
    // PairSet (offset 0x12)
    0x00, 0x01,             // uint16   pairValueCount
    0x00, 0x59,             // uint16   pairValueRecords[0].secondGlyph (89)
    0xFF, 0xE2,             // int16    pairValueRecords[0].valueRecord1.xAdvance (-30)
];

/// Pair positioning format 2: a 2x2 class matrix of x-advances.
#[rustfmt::skip]
pub static PAIRPOSFORMAT2: &[u8] = &[
    0x00, 0x02,             // uint16   posFormat
    0x00, 0x18,             // Offset16 coverageOffset
    0x00, 0x04,             // uint16   valueFormat1 (X_ADVANCE)
    0x00, 0x00,             // uint16   valueFormat2
    0x00, 0x20,             // Offset16 classDef1Offset
    0x00, 0x2A,             // Offset16 classDef2Offset
    0x00, 0x02,             // uint16   class1Count
    0x00, 0x02,             // uint16   class2Count
    0x00, 0x00,             // int16    class1Records[0].class2Records[0].valueRecord1.xAdvance
    0xFF, 0xEC,             // int16    class1Records[0].class2Records[1].valueRecord1.xAdvance (-20)
    0x00, 0x00,             // int16    class1Records[1].class2Records[0].valueRecord1.xAdvance
    0xFF, 0xD8,             // int16    class1Records[1].class2Records[1].valueRecord1.xAdvance (-40)
    // coverage (offset 0x18)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x14,             // uint16   glyphArray[0] (20)
    0x00, 0x15,             // uint16   glyphArray[1] (21)
    // class def 1 (offset 0x20)
    0x00, 0x01,             // uint16   classFormat
    0x00, 0x14,             // uint16   startGlyphID (20)
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x00,             // uint16   classValueArray[0]
    0x00, 0x01,             // uint16   classValueArray[1]
    // class def 2 (offset 0x2A)
    0x00, 0x02,             // uint16   classFormat
    0x00, 0x01,             // uint16   classRangeCount
    0x00, 0x6A,             // uint16   classRangeRecords[0].startGlyphID (106)
    0x00, 0x6B,             // uint16   classRangeRecords[0].endGlyphID (107)
    0x00, 0x01,             // uint16   classRangeRecords[0].class
];

/// Cursive attachment: glyph 8 with an entry anchor at (1500, 44), no exit.
#[rustfmt::skip]
pub static CURSIVEPOSFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   posFormat
    0x00, 0x0A,             // Offset16 coverageOffset
    0x00, 0x01,             // uint16   entryExitCount
    0x00, 0x10,             // Offset16 entryExitRecord[0].entryAnchorOffset
    0x00, 0x00,             // Offset16 entryExitRecord[0].exitAnchorOffset (null)
    // coverage (offset 0x0A)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x08,             // uint16   glyphArray[0] (8)
    // entry anchor (offset 0x10)
    0x00, 0x01,             // uint16   anchorFormat
    0x05, 0xDC,             // int16    xCoordinate (1500)
    0x00, 0x2C,             // int16    yCoordinate (44)
];

/// Mark-to-base: mark 50 (class 1) onto base 60; two mark classes, the
/// base's class-0 anchor slot is null.
#[rustfmt::skip]
pub static MARKBASEPOSFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   posFormat
    0x00, 0x0C,             // Offset16 markCoverageOffset
    0x00, 0x12,             // Offset16 baseCoverageOffset
    0x00, 0x02,             // uint16   markClassCount
    0x00, 0x18,             // Offset16 markArrayOffset
    0x00, 0x24,             // Offset16 baseArrayOffset
    // mark coverage (offset 0x0C)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x32,             // uint16   glyphArray[0] (50)
    // base coverage (offset 0x12)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x3C,             // uint16   glyphArray[0] (60)
    // MarkArray (offset 0x18)
    0x00, 0x01,             // uint16   markCount
    0x00, 0x01,             // uint16   markRecords[0].markClass
    0x00, 0x06,             // Offset16 markRecords[0].markAnchorOffset
    // mark anchor (array offset 0x06)
    0x00, 0x01,             // uint16   anchorFormat
    0x00, 0x0A,             // int16    xCoordinate (10)
    0x00, 0x14,             // int16    yCoordinate (20)
    // BaseArray (offset 0x24)
    0x00, 0x01,             // uint16   baseCount
    0x00, 0x00,             // Offset16 baseRecords[0].baseAnchorOffsets[0] (null)
    0x00, 0x06,             // Offset16 baseRecords[0].baseAnchorOffsets[1]
    // base anchor (array offset 0x06)
    0x00, 0x01,             // uint16   anchorFormat
    0x01, 0xF4,             // int16    xCoordinate (500)
    0x00, 0x64,             // int16    yCoordinate (100)
];

/// Mark-to-ligature: mark 5 onto a two-component ligature 30; the first
/// component has no anchor.
#[rustfmt::skip]
pub static MARKLIGPOSFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   posFormat
    0x00, 0x0C,             // Offset16 markCoverageOffset
    0x00, 0x12,             // Offset16 ligatureCoverageOffset
    0x00, 0x01,             // uint16   markClassCount
    0x00, 0x18,             // Offset16 markArrayOffset
    0x00, 0x24,             // Offset16 ligatureArrayOffset
    // mark coverage (offset 0x0C)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x05,             // uint16   glyphArray[0] (5)
    // ligature coverage (offset 0x12)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x1E,             // uint16   glyphArray[0] (30)
    // MarkArray (offset 0x18)
    0x00, 0x01,             // uint16   markCount
    0x00, 0x00,             // uint16   markRecords[0].markClass
    0x00, 0x06,             // Offset16 markRecords[0].markAnchorOffset
    // mark anchor (array offset 0x06)
    0x00, 0x01,             // uint16   anchorFormat
    0x00, 0x05,             // int16    xCoordinate (5)
    0x00, 0x0A,             // int16    yCoordinate (10)
    // LigatureArray (offset 0x24)
    0x00, 0x01,             // uint16   ligatureCount
    0x00, 0x04,             // Offset16 ligatureAttachOffsets[0]
    // LigatureAttach (array offset 0x04)
    0x00, 0x02,             // uint16   componentCount
    0x00, 0x00,             // Offset16 componentRecords[0].ligatureAnchorOffsets[0] (null)
    0x00, 0x06,             // Offset16 componentRecords[1].ligatureAnchorOffsets[0]
    // component anchor (attach offset 0x06)
    0x00, 0x01,             // uint16   anchorFormat
    0x00, 0x37,             // int16    xCoordinate (55)
    0xFF, 0xD8,             // int16    yCoordinate (-40)
];

/// Mark-to-mark: mark 5 onto mark 6, one class.
#[rustfmt::skip]
pub static MARKMARKPOSFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   posFormat
    0x00, 0x0C,             // Offset16 mark1CoverageOffset
    0x00, 0x12,             // Offset16 mark2CoverageOffset
    0x00, 0x01,             // uint16   markClassCount
    0x00, 0x18,             // Offset16 mark1ArrayOffset
    0x00, 0x24,             // Offset16 mark2ArrayOffset
    // mark1 coverage (offset 0x0C)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x05,             // uint16   glyphArray[0] (5)
    // mark2 coverage (offset 0x12)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x06,             // uint16   glyphArray[0] (6)
    // Mark1Array (offset 0x18)
    0x00, 0x01,             // uint16   markCount
    0x00, 0x00,             // uint16   markRecords[0].markClass
    0x00, 0x06,             // Offset16 markRecords[0].markAnchorOffset
    // mark1 anchor (array offset 0x06)
    0x00, 0x01,             // uint16   anchorFormat
    0x00, 0xDD,             // int16    xCoordinate (221)
    0x01, 0x2D,             // int16    yCoordinate (301)
    // Mark2Array (offset 0x24)
    0x00, 0x01,             // uint16   mark2Count
    0x00, 0x06,             // Offset16 mark2Records[0].mark2AnchorOffsets[0]
    // mark2 anchor (array offset 0x06)
    0x00, 0x01,             // uint16   anchorFormat
    0x00, 0x15,             // int16    xCoordinate (21)
    0x00, 0x2A,             // int16    yCoordinate (42)
];

/// An extension wrapper whose inner lookup type is again the extension
/// type; structurally forbidden.
#[rustfmt::skip]
pub static EXTENSIONPOSFORMAT1_NESTED: &[u8] = &[
    0x00, 0x01,             // uint16   posFormat
    0x00, 0x09,             // uint16   extensionLookupType (extension!)
    0x00, 0x00, 0x00, 0x08, // Offset32 extensionOffset
];

/// A whole GPOS table with one single-positioning lookup (x-advance +7 for
/// glyph 10).
pub fn gpos_graph() -> BeBuffer {
    be_buffer! {
        // GPOS header
        1_u16,              // majorVersion
        0_u16,              // minorVersion
        0_u16,              // scriptListOffset (unused here)
        0_u16,              // featureListOffset (unused here)
        10_u16,             // lookupListOffset
        // LookupList (offset 10)
        1_u16,              // lookupCount
        4_u16,              // lookupOffsets[0]
        // Lookup 0 (list offset 4)
        1_u16,              // lookupType (single pos)
        0_u16,              // lookupFlag
        1_u16,              // subTableCount
        8_u16,              // subtableOffsets[0]
        // single pos format 1 (lookup offset 8)
        1_u16,              // posFormat
        8_u16,              // coverageOffset
        4_u16,              // valueFormat (X_ADVANCE)
        7_u16,              // valueRecord.xAdvance
        1_u16,              // coverageFormat
        1_u16,              // glyphCount
        10_u16              // glyphArray[0]
    }
}

//! Fixtures for the common layout formats.

/// Format 2 coverage: glyphs 10..=12 (indices 0..=2) and 20..=21 (3..=4).
#[rustfmt::skip]
pub static COVERAGE_FORMAT2: &[u8] = &[
    0x00, 0x02,             // uint16   coverageFormat
    0x00, 0x02,             // uint16   rangeCount
    0x00, 0x0A,             // uint16   rangeRecords[0].startGlyphID (10)
    0x00, 0x0C,             // uint16   rangeRecords[0].endGlyphID (12)
    0x00, 0x00,             // uint16   rangeRecords[0].startCoverageIndex
    0x00, 0x14,             // uint16   rangeRecords[1].startGlyphID (20)
    0x00, 0x15,             // uint16   rangeRecords[1].endGlyphID (21)
    0x00, 0x03,             // uint16   rangeRecords[1].startCoverageIndex
];

/// Format 1 coverage whose glyph array is out of order.
#[rustfmt::skip]
pub static COVERAGE_FORMAT1_UNSORTED: &[u8] = &[
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x09,             // uint16   glyphArray[0] (9)
    0x00, 0x05,             // uint16   glyphArray[1] (5)
];

/// Format 1 class def: glyphs 30..=32 get classes 1, 0, 2.
#[rustfmt::skip]
pub static CLASSDEF_FORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   classFormat
    0x00, 0x1E,             // uint16   startGlyphID (30)
    0x00, 0x03,             // uint16   glyphCount
    0x00, 0x01,             // uint16   classValueArray[0]
    0x00, 0x00,             // uint16   classValueArray[1]
    0x00, 0x02,             // uint16   classValueArray[2]
];

/// Format 2 class def: glyphs 40..=45 are class 3.
#[rustfmt::skip]
pub static CLASSDEF_FORMAT2: &[u8] = &[
    0x00, 0x02,             // uint16   classFormat
    0x00, 0x01,             // uint16   classRangeCount
    0x00, 0x28,             // uint16   classRangeRecords[0].startGlyphID (40)
    0x00, 0x2D,             // uint16   classRangeRecords[0].endGlyphID (45)
    0x00, 0x03,             // uint16   classRangeRecords[0].class
];

/// Format 1 sequence context: covered glyph 20, one rule "20 21 -> lookup 1
/// at position 0".
#[rustfmt::skip]
pub static SEQUENCECONTEXTFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   format
    0x00, 0x08,             // Offset16 coverageOffset
    0x00, 0x01,             // uint16   seqRuleSetCount
    0x00, 0x0E,             // Offset16 seqRuleSetOffsets[0]
    // coverage (offset 0x08)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x14,             // uint16   glyphArray[0] (20)
    // SequenceRuleSet (offset 0x0E)
    0x00, 0x01,             // uint16   seqRuleCount
    0x00, 0x04,             // Offset16 seqRuleOffsets[0]
    // SequenceRule (ruleset offset 0x04)
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x01,             // uint16   seqLookupCount
    0x00, 0x15,             // uint16   inputSequence[0] (21)
    0x00, 0x00,             // uint16   seqLookupRecords[0].sequenceIndex
    0x00, 0x01,             // uint16   seqLookupRecords[0].lookupListIndex
];

/// Format 2 sequence context: glyphs 40/41 are class 1; the class-0 rule set
/// offset is null.
#[rustfmt::skip]
pub static SEQUENCECONTEXTFORMAT2: &[u8] = &[
    0x00, 0x02,             // uint16   format
    0x00, 0x0C,             // Offset16 coverageOffset
    0x00, 0x12,             // Offset16 classDefOffset
    0x00, 0x02,             // uint16   classSeqRuleSetCount
    0x00, 0x00,             // Offset16 classSeqRuleSetOffsets[0] (null)
    0x00, 0x1C,             // Offset16 classSeqRuleSetOffsets[1]
    // coverage (offset 0x0C)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x28,             // uint16   glyphArray[0] (40)
    // class def (offset 0x12)
    0x00, 0x01,             // uint16   classFormat
    0x00, 0x28,             // uint16   startGlyphID (40)
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x01,             // uint16   classValueArray[0]
    0x00, 0x01,             // uint16   classValueArray[1]
    // ClassSequenceRuleSet (offset 0x1C)
    0x00, 0x01,             // uint16   classSeqRuleCount
    0x00, 0x04,             // Offset16 classSeqRuleOffsets[0]
    // ClassSequenceRule (ruleset offset 0x04)
    0x00, 0x02,             // uint16   glyphCount
    0x00, 0x01,             // uint16   seqLookupCount
    0x00, 0x01,             // uint16   inputSequence[0] (class 1)
    0x00, 0x00,             // uint16   seqLookupRecords[0].sequenceIndex
    0x00, 0x05,             // uint16   seqLookupRecords[0].lookupListIndex
];

/// Format 1 chained context: backtrack 7, input 8 9, lookahead 10.
#[rustfmt::skip]
pub static CHAINEDSEQUENCECONTEXTFORMAT1: &[u8] = &[
    0x00, 0x01,             // uint16   format
    0x00, 0x08,             // Offset16 coverageOffset
    0x00, 0x01,             // uint16   chainedSeqRuleSetCount
    0x00, 0x0E,             // Offset16 chainedSeqRuleSetOffsets[0]
    // coverage (offset 0x08)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x08,             // uint16   glyphArray[0] (8)
    // ChainedSequenceRuleSet (offset 0x0E)
    0x00, 0x01,             // uint16   chainedSeqRuleCount
    0x00, 0x04,             // Offset16 chainedSeqRuleOffsets[0]
    // ChainedSequenceRule (ruleset offset 0x04)
    0x00, 0x01,             // uint16   backtrackGlyphCount
    0x00, 0x07,             // uint16   backtrackSequence[0] (7)
    0x00, 0x02,             // uint16   inputGlyphCount
    0x00, 0x09,             // uint16   inputSequence[0] (9)
    0x00, 0x01,             // uint16   lookaheadGlyphCount
    0x00, 0x0A,             // uint16   lookaheadSequence[0] (10)
    0x00, 0x01,             // uint16   seqLookupCount
    0x00, 0x01,             // uint16   seqLookupRecords[0].sequenceIndex
    0x00, 0x03,             // uint16   seqLookupRecords[0].lookupListIndex
];

/// Format 2 chained context with all three class defs present.
#[rustfmt::skip]
pub static CHAINEDSEQUENCECONTEXTFORMAT2: &[u8] = &[
    0x00, 0x02,             // uint16   format
    0x00, 0x0E,             // Offset16 coverageOffset
    0x00, 0x14,             // Offset16 backtrackClassDefOffset
    0x00, 0x1C,             // Offset16 inputClassDefOffset
    0x00, 0x24,             // Offset16 lookaheadClassDefOffset
    0x00, 0x01,             // uint16   chainedClassSeqRuleSetCount
    0x00, 0x2C,             // Offset16 chainedClassSeqRuleSetOffsets[0]
    // coverage (offset 0x0E)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x14,             // uint16   glyphArray[0] (20)
    // backtrack class def (offset 0x14)
    0x00, 0x01,             // uint16   classFormat
    0x00, 0x14,             // uint16   startGlyphID (20)
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x01,             // uint16   classValueArray[0]
    // input class def (offset 0x1C)
    0x00, 0x01,             // uint16   classFormat
    0x00, 0x14,             // uint16   startGlyphID (20)
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x02,             // uint16   classValueArray[0]
    // lookahead class def (offset 0x24)
    0x00, 0x01,             // uint16   classFormat
    0x00, 0x15,             // uint16   startGlyphID (21)
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x01,             // uint16   classValueArray[0]
    // ChainedClassSequenceRuleSet (offset 0x2C)
    0x00, 0x01,             // uint16   chainedClassSeqRuleCount
    0x00, 0x04,             // Offset16 chainedClassSeqRuleOffsets[0]
    // ChainedClassSequenceRule (ruleset offset 0x04)
    0x00, 0x01,             // uint16   backtrackGlyphCount
    0x00, 0x01,             // uint16   backtrackSequence[0] (class 1)
    0x00, 0x01,             // uint16   inputGlyphCount
    0x00, 0x01,             // uint16   lookaheadGlyphCount
    0x00, 0x01,             // uint16   lookaheadSequence[0] (class 1)
    0x00, 0x01,             // uint16   seqLookupCount
    0x00, 0x00,             // uint16   seqLookupRecords[0].sequenceIndex
    0x00, 0x04,             // uint16   seqLookupRecords[0].lookupListIndex
];

/// Format 3 chained context: one coverage per context part.
#[rustfmt::skip]
pub static CHAINEDSEQUENCECONTEXTFORMAT3: &[u8] = &[
    0x00, 0x03,             // uint16   format
    0x00, 0x01,             // uint16   backtrackGlyphCount
    0x00, 0x14,             // Offset16 backtrackCoverageOffsets[0]
    0x00, 0x01,             // uint16   inputGlyphCount
    0x00, 0x1A,             // Offset16 inputCoverageOffsets[0]
    0x00, 0x01,             // uint16   lookaheadGlyphCount
    0x00, 0x20,             // Offset16 lookaheadCoverageOffsets[0]
    0x00, 0x01,             // uint16   seqLookupCount
    0x00, 0x00,             // uint16   seqLookupRecords[0].sequenceIndex
    0x00, 0x02,             // uint16   seqLookupRecords[0].lookupListIndex
    // backtrack coverage (offset 0x14)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x05,             // uint16   glyphArray[0] (5)
    // input coverage (offset 0x1A)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x06,             // uint16   glyphArray[0] (6)
    // lookahead coverage (offset 0x20)
    0x00, 0x01,             // uint16   coverageFormat
    0x00, 0x01,             // uint16   glyphCount
    0x00, 0x07,             // uint16   glyphArray[0] (7)
];

use super::*;
use layout_test_data::layout as test_data;
use crate::types::GlyphId16;

fn gid(id: u16) -> GlyphId16 {
    GlyphId16::new(id)
}

#[test]
fn coverage_format1() {
    let bytes = [0x00, 0x01, 0x00, 0x02, 0x00, 0x05, 0x00, 0x09];
    let coverage = CoverageTable::read(Segment::new(&bytes)).unwrap();
    assert_eq!(coverage.count(), 2);
    assert_eq!(coverage.get(gid(5)), Some(0));
    assert_eq!(coverage.get(gid(9)), Some(1));
    assert_eq!(coverage.get(gid(6)), None);
    assert_eq!(coverage.iter().collect::<Vec<_>>(), vec![gid(5), gid(9)]);
    assert!(coverage.sanity_check().is_ok());
}

#[test]
fn coverage_format2() {
    let coverage = CoverageTable::read(Segment::new(test_data::COVERAGE_FORMAT2)).unwrap();
    assert_eq!(coverage.count(), 5);
    assert_eq!(coverage.get(gid(10)), Some(0));
    assert_eq!(coverage.get(gid(12)), Some(2));
    assert_eq!(coverage.get(gid(20)), Some(3));
    assert_eq!(coverage.get(gid(21)), Some(4));
    assert_eq!(coverage.get(gid(13)), None);
    // the traversal enumerates exactly `count` glyphs
    assert_eq!(coverage.iter().count(), coverage.count());
    assert!(coverage.sanity_check().is_ok());
}

#[test]
fn coverage_unsorted_is_flagged_not_fatal() {
    let coverage =
        CoverageTable::read(Segment::new(test_data::COVERAGE_FORMAT1_UNSORTED)).unwrap();
    assert!(coverage.sanity_check().is_err());
    // lookups still work for whatever binary search happens to find
    assert_eq!(coverage.count(), 2);
}

#[test]
fn coverage_truncated() {
    // count says 3 but only one glyph follows
    let bytes = [0x00, 0x01, 0x00, 0x03, 0x00, 0x05];
    assert!(matches!(
        CoverageTable::read(Segment::new(&bytes)),
        Err(ReadError::OutOfBounds)
    ));
}

#[test]
fn coverage_bad_format() {
    let bytes = [0x00, 0x03, 0x00, 0x00];
    assert!(matches!(
        CoverageTable::read(Segment::new(&bytes)),
        Err(ReadError::InvalidFormat(3))
    ));
}

#[test]
fn class_def_format1() {
    let class_def = ClassDef::read(Segment::new(test_data::CLASSDEF_FORMAT1)).unwrap();
    assert_eq!(class_def.get(gid(30)), 1);
    assert_eq!(class_def.get(gid(31)), 0);
    assert_eq!(class_def.get(gid(32)), 2);
    // out of the table means class 0
    assert_eq!(class_def.get(gid(29)), 0);
    assert_eq!(class_def.get(gid(33)), 0);
    assert_eq!(class_def.max_class(), 2);
}

#[test]
fn class_def_format2() {
    let class_def = ClassDef::read(Segment::new(test_data::CLASSDEF_FORMAT2)).unwrap();
    assert_eq!(class_def.get(gid(40)), 3);
    assert_eq!(class_def.get(gid(45)), 3);
    assert_eq!(class_def.get(gid(46)), 0);
    assert_eq!(class_def.max_class(), 3);
    assert!(class_def.sanity_check().is_ok());
}

#[test]
fn sequence_context_format1() {
    let table = SequenceContext::read(Segment::new(test_data::SEQUENCECONTEXTFORMAT1)).unwrap();
    let SequenceContext::Format1(table) = table else {
        panic!("expected format 1");
    };
    assert_eq!(table.coverage.get(gid(20)), Some(0));
    assert_eq!(table.rule_sets.len(), 1);
    let rules = table.rule_sets[0].as_ref().unwrap();
    assert_eq!(rules.len(), 1);
    let rule = &rules[0];
    // the first glyph lives in the coverage; input holds the rest
    assert_eq!(rule.input.len(), 1);
    assert_eq!(rule.input[0].get(), gid(21));
    assert_eq!(rule.records.len(), 1);
    assert_eq!(rule.records[0].sequence_index(), 0);
    assert_eq!(rule.records[0].lookup_list_index(), 1);
}

#[test]
fn sequence_context_format2() {
    let table = SequenceContext::read(Segment::new(test_data::SEQUENCECONTEXTFORMAT2)).unwrap();
    let SequenceContext::Format2(table) = table else {
        panic!("expected format 2");
    };
    assert_eq!(table.class_def.get(gid(40)), 1);
    assert_eq!(table.rule_sets.len(), 2);
    assert!(table.rule_sets[0].is_none());
    let rules = table.rule_sets[1].as_ref().unwrap();
    assert_eq!(rules[0].input.len(), 1);
    assert_eq!(rules[0].input[0].get(), 1);
    assert_eq!(rules[0].records[0].lookup_list_index(), 5);
}

#[test]
fn sequence_context_format3() {
    #[rustfmt::skip]
    let bytes = [
        0x00, 0x03,             // format
        0x00, 0x02,             // glyphCount
        0x00, 0x01,             // seqLookupCount
        0x00, 0x10,             // coverageOffsets[0]
        0x00, 0x16,             // coverageOffsets[1]
        0x00, 0x01, 0x00, 0x02, // seqLookupRecords[0]
        0x00, 0x00,             // (padding to offset 0x10)
        0x00, 0x01, 0x00, 0x01, 0x00, 0x05, // coverage {5}
        0x00, 0x01, 0x00, 0x01, 0x00, 0x06, // coverage {6}
    ];
    let table = SequenceContext::read(Segment::new(&bytes)).unwrap();
    let SequenceContext::Format3(table) = table else {
        panic!("expected format 3");
    };
    assert_eq!(table.coverages.len(), 2);
    assert_eq!(table.coverages[0].get(gid(5)), Some(0));
    assert_eq!(table.coverages[1].get(gid(6)), Some(0));
    assert_eq!(table.records[0].sequence_index(), 1);
    assert_eq!(table.records[0].lookup_list_index(), 2);
}

#[test]
fn chained_context_format1() {
    let table =
        ChainedSequenceContext::read(Segment::new(test_data::CHAINEDSEQUENCECONTEXTFORMAT1))
            .unwrap();
    let ChainedSequenceContext::Format1(table) = table else {
        panic!("expected format 1");
    };
    let rules = table.rule_sets[0].as_ref().unwrap();
    let rule = &rules[0];
    assert_eq!(rule.backtrack.len(), 1);
    assert_eq!(rule.backtrack[0].get(), gid(7));
    assert_eq!(rule.input.len(), 1);
    assert_eq!(rule.input[0].get(), gid(9));
    assert_eq!(rule.lookahead.len(), 1);
    assert_eq!(rule.lookahead[0].get(), gid(10));
    assert_eq!(rule.records[0].sequence_index(), 1);
    assert_eq!(rule.records[0].lookup_list_index(), 3);
}

#[test]
fn chained_context_format2() {
    let table =
        ChainedSequenceContext::read(Segment::new(test_data::CHAINEDSEQUENCECONTEXTFORMAT2))
            .unwrap();
    let ChainedSequenceContext::Format2(table) = table else {
        panic!("expected format 2");
    };
    assert_eq!(table.backtrack_classes.unwrap().get(gid(20)), 1);
    assert_eq!(table.input_classes.get(gid(20)), 2);
    assert_eq!(table.lookahead_classes.unwrap().get(gid(21)), 1);
    let rule = &table.rule_sets[0].as_ref().unwrap()[0];
    assert_eq!(rule.backtrack.len(), 1);
    // an input count of one means no glyphs after the covered one
    assert!(rule.input.is_empty());
    assert_eq!(rule.records[0].lookup_list_index(), 4);
}

#[test]
fn chained_context_format3() {
    let table =
        ChainedSequenceContext::read(Segment::new(test_data::CHAINEDSEQUENCECONTEXTFORMAT3))
            .unwrap();
    let ChainedSequenceContext::Format3(table) = table else {
        panic!("expected format 3");
    };
    assert_eq!(table.backtrack_coverages.len(), 1);
    assert_eq!(table.input_coverages.len(), 1);
    assert_eq!(table.lookahead_coverages.len(), 1);
    assert_eq!(table.input_coverages[0].get(gid(6)), Some(0));
    assert_eq!(table.records[0].lookup_list_index(), 2);
    // the primary coverage is the first input coverage
    assert_eq!(
        ChainedSequenceContext::Format3(table)
            .primary_coverage()
            .unwrap()
            .get(gid(6)),
        Some(0)
    );
}

#[test]
fn empty_rule_is_malformed() {
    // a rule with glyphCount 0 cannot describe a sequence
    #[rustfmt::skip]
    let bytes = [
        0x00, 0x01,             // format
        0x00, 0x08,             // coverageOffset
        0x00, 0x01,             // seqRuleSetCount
        0x00, 0x0E,             // seqRuleSetOffsets[0]
        0x00, 0x01, 0x00, 0x01, 0x00, 0x14, // coverage {20}
        0x00, 0x01,             // seqRuleCount
        0x00, 0x04,             // seqRuleOffsets[0]
        0x00, 0x00,             // glyphCount (bad)
        0x00, 0x00,             // seqLookupCount
    ];
    assert!(matches!(
        SequenceContext::read(Segment::new(&bytes)),
        Err(ReadError::MalformedData(_))
    ));
}

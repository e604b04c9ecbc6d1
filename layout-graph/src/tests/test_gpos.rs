use super::*;
use crate::error::Diagnostics;
use layout_test_data::gpos as test_data;
use pretty_assertions::assert_eq;
use crate::types::GlyphId16;

fn decode_gpos<'a>(bytes: &'a [u8], lookup_type: u16) -> Decoded<'a, GposPayload<'a>> {
    let mut notes = Diagnostics::default();
    let decoded = decode(
        Segment::new(bytes),
        lookup_type,
        Tag::new(b"GPOS"),
        &mut notes,
    )
    .unwrap();
    assert!(notes.into_worst().is_none());
    decoded
}

#[test]
fn singleposformat1() {
    let decoded = decode_gpos(test_data::SINGLEPOSFORMAT1, 1);
    let GposPayload::SinglePos1(table) = decoded.payload else {
        panic!("expected single pos format 1");
    };
    assert_eq!(table.value_format, ValueFormat::X_ADVANCE);
    assert_eq!(table.value.x_advance, Some(7));
    assert_eq!(table.value.y_advance, None);
    assert_eq!(table.coverage.get(GlyphId16::new(10)), Some(0));
}

#[test]
fn singleposformat2() {
    let decoded = decode_gpos(test_data::SINGLEPOSFORMAT2, 1);
    let GposPayload::SinglePos2(table) = decoded.payload else {
        panic!("expected single pos format 2");
    };
    assert_eq!(table.values.len(), 2);
    assert_eq!(table.values[0].x_advance, Some(7));
    assert_eq!(table.values[1].x_advance, Some(9));
}

#[test]
fn pairposformat1() {
    let decoded = decode_gpos(test_data::PAIRPOSFORMAT1, 2);
    let GposPayload::PairPos1(table) = decoded.payload else {
        panic!("expected pair pos format 1");
    };
    assert_eq!(table.value_format1, ValueFormat::X_ADVANCE);
    assert_eq!(table.value_format2, ValueFormat::empty());
    assert_eq!(table.pair_sets.len(), 1);
    let record = &table.pair_sets[0][0];
    assert_eq!(record.second_glyph, GlyphId16::new(0x59));
    assert_eq!(record.value1.x_advance, Some(-30));
    assert_eq!(record.value2.x_advance, None);
}

#[test]
fn pairposformat2() {
    let decoded = decode_gpos(test_data::PAIRPOSFORMAT2, 2);
    let GposPayload::PairPos2(table) = decoded.payload else {
        panic!("expected pair pos format 2");
    };
    assert_eq!(table.class1_count, 2);
    assert_eq!(table.class2_count, 2);
    assert_eq!(table.class_def1.get(GlyphId16::new(21)), 1);
    assert_eq!(table.class_def2.get(GlyphId16::new(106)), 1);
    assert_eq!(
        table.class_record(0, 1).unwrap().value1.x_advance,
        Some(-20)
    );
    assert_eq!(
        table.class_record(1, 1).unwrap().value1.x_advance,
        Some(-40)
    );
    assert_eq!(table.class_record(2, 0), None);
}

#[test]
fn cursiveposformat1() {
    let decoded = decode_gpos(test_data::CURSIVEPOSFORMAT1, 3);
    let GposPayload::CursivePos1(table) = decoded.payload else {
        panic!("expected cursive pos format 1");
    };
    assert_eq!(table.entry_exits.len(), 1);
    let record = &table.entry_exits[0];
    let entry = record.entry.unwrap();
    assert_eq!(entry.x_coordinate(), 1500);
    assert_eq!(entry.y_coordinate(), 44);
    assert!(record.exit.is_none());
}

#[test]
fn markbaseposformat1() {
    let decoded = decode_gpos(test_data::MARKBASEPOSFORMAT1, 4);
    let GposPayload::MarkBasePos1(table) = decoded.payload else {
        panic!("expected mark base pos format 1");
    };
    assert_eq!(table.mark_coverage.get(GlyphId16::new(50)), Some(0));
    assert_eq!(table.base_coverage.get(GlyphId16::new(60)), Some(0));
    assert_eq!(table.mark_class_count, 2);

    assert_eq!(table.mark_records.len(), 1);
    let mark = &table.mark_records[0];
    assert_eq!(mark.mark_class, 1);
    assert_eq!(mark.anchor.x_coordinate(), 10);
    assert_eq!(mark.anchor.y_coordinate(), 20);

    assert_eq!(table.base_records.len(), 1);
    let base = &table.base_records[0];
    assert_eq!(base.len(), 2);
    assert!(base[0].is_none());
    let anchor = base[1].unwrap();
    assert_eq!(anchor.x_coordinate(), 500);
    assert_eq!(anchor.y_coordinate(), 100);
}

#[test]
fn markligposformat1() {
    let decoded = decode_gpos(test_data::MARKLIGPOSFORMAT1, 5);
    let GposPayload::MarkLigPos1(table) = decoded.payload else {
        panic!("expected mark lig pos format 1");
    };
    assert_eq!(table.ligature_records.len(), 1);
    let components = &table.ligature_records[0];
    assert_eq!(components.len(), 2);
    assert!(components[0][0].is_none());
    let anchor = components[1][0].unwrap();
    assert_eq!(anchor.x_coordinate(), 55);
    assert_eq!(anchor.y_coordinate(), -40);
}

#[test]
fn markmarkposformat1() {
    let decoded = decode_gpos(test_data::MARKMARKPOSFORMAT1, 6);
    let GposPayload::MarkMarkPos1(table) = decoded.payload else {
        panic!("expected mark mark pos format 1");
    };
    assert_eq!(table.mark1_records.len(), 1);
    let anchor = table.mark1_records[0].anchor;
    assert_eq!(anchor.x_coordinate(), 221);
    assert_eq!(anchor.y_coordinate(), 301);
    assert_eq!(table.mark2_records.len(), 1);
    let anchor = table.mark2_records[0][0].unwrap();
    assert_eq!((anchor.x_coordinate(), anchor.y_coordinate()), (21, 42));
}

#[test]
fn contextual_through_gpos_type7() {
    let decoded = decode_gpos(layout_test_data::layout::SEQUENCECONTEXTFORMAT2, 7);
    let GposPayload::Contextual(SequenceContext::Format2(_)) = decoded.payload else {
        panic!("expected sequence context format 2");
    };
    assert_eq!(decoded.coverage.unwrap().get(GlyphId16::new(40)), Some(0));
}

#[test]
fn chained_through_gpos_type8() {
    let decoded = decode_gpos(layout_test_data::layout::CHAINEDSEQUENCECONTEXTFORMAT1, 8);
    assert!(matches!(
        decoded.payload,
        GposPayload::ChainContextual(ChainedSequenceContext::Format1(_))
    ));
}

#[test]
fn anchor_formats() {
    let format2 = [0x00, 0x02, 0x01, 0x42, 0xFF, 0x99, 0x00, 0x0D];
    let AnchorTable::Format2(anchor) = AnchorTable::read(Segment::new(&format2)).unwrap() else {
        panic!("expected anchor format 2");
    };
    assert_eq!(anchor.x_coordinate, 322);
    assert_eq!(anchor.anchor_point, 13);

    let format3 = [
        0x00, 0x03, 0x01, 0x17, 0x05, 0x15, 0x00, 0x0A, 0x00, 0x00,
    ];
    let AnchorTable::Format3(anchor) = AnchorTable::read(Segment::new(&format3)).unwrap() else {
        panic!("expected anchor format 3");
    };
    assert_eq!(anchor.x_coordinate, 279);
    assert_eq!(anchor.y_coordinate, 1301);
    assert_eq!(anchor.x_device_offset, 10);
    assert_eq!(anchor.y_device_offset, 0);
}

#[test]
fn mark_class_out_of_range_is_noted() {
    // rewrite the mark record's class to 7, beyond markClassCount 2
    let mut bytes = test_data::MARKBASEPOSFORMAT1.to_vec();
    bytes[26] = 0x00;
    bytes[27] = 0x07;
    let mut notes = Diagnostics::default();
    let decoded = decode(Segment::new(&bytes), 4, Tag::new(b"GPOS"), &mut notes).unwrap();
    assert!(matches!(decoded.payload, GposPayload::MarkBasePos1(_)));
    let note = notes.into_worst().unwrap();
    assert_eq!(note.severity, Severity::Major);
    assert_eq!(note.section, "MarkBasePos");
}

#[test]
fn truncated_pair_set_fails_whole_subtable() {
    // drop the last byte of the pair set; the whole subtable must error
    // rather than yield a partial payload
    let bytes = &test_data::PAIRPOSFORMAT1[..test_data::PAIRPOSFORMAT1.len() - 1];
    let mut notes = Diagnostics::default();
    assert!(matches!(
        decode(Segment::new(bytes), 2, Tag::new(b"GPOS"), &mut notes),
        Err(ReadError::OutOfBounds)
    ));
}

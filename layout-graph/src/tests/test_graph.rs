use super::*;
use layout_test_data::be_buffer;
use layout_test_data::{gpos as gpos_data, gsub as gsub_data};
use crate::types::GlyphId16;

fn gsub_graph<'a>(
    blob: &'a [u8],
    collector: &mut ErrorCollector,
) -> LookupListGraph<'a> {
    LookupListGraph::for_table(blob, 0, blob.len(), TableKind::Gsub, collector)
}

#[test]
fn walks_a_gsub_table() {
    let _ = env_logger::builder().is_test(true).try_init();
    let buf = gsub_data::gsub_graph();
    let mut collector = ErrorCollector::new();
    let graph = gsub_graph(&buf, &mut collector);
    assert!(collector.is_empty());
    assert!(graph.error().is_none());
    assert_eq!(graph.len(), 2);

    let lookup = graph.lookup(0).unwrap();
    assert_eq!(lookup.lookup_type(), 1);
    assert_eq!(lookup.subtable_count(), 1);
    let node = lookup.subtable(0).unwrap();
    assert!(node.error().is_none());
    assert_eq!(node.lookup_type(), 1);
    assert_eq!(node.format(), 1);
    let Some(GsubPayload::SingleSubst1(table)) = node.gsub_payload() else {
        panic!("expected single subst payload");
    };
    assert_eq!(table.delta_glyph_id, 3);

    assert!(graph.lookup(2).is_none());
}

#[test]
fn range_iterates_in_declaration_order() {
    let buf = gsub_data::gsub_graph();
    let mut collector = ErrorCollector::new();
    let graph = gsub_graph(&buf, &mut collector);
    let types: Vec<_> = graph
        .range()
        .map(|(i, lookup)| (i, lookup.lookup_type()))
        .collect();
    assert_eq!(types, vec![(0, 1), (1, 7)]);
}

#[test]
fn walks_a_gpos_table() {
    let buf = gpos_data::gpos_graph();
    let mut collector = ErrorCollector::new();
    let graph =
        LookupListGraph::for_table(&buf, 0, buf.len(), TableKind::Gpos, &mut collector);
    assert_eq!(graph.kind(), TableKind::Gpos);
    let node = graph.lookup(0).unwrap().subtable(0).unwrap();
    let Some(GposPayload::SinglePos1(table)) = node.gpos_payload() else {
        panic!("expected single pos payload");
    };
    assert_eq!(table.value.x_advance, Some(7));
    assert!(node.gsub_payload().is_none());
}

#[test]
fn repeated_access_is_pointer_stable() {
    let buf = gsub_data::gsub_graph();
    let mut collector = ErrorCollector::new();
    let graph = gsub_graph(&buf, &mut collector);
    let first = graph.lookup(0).unwrap();
    let second = graph.lookup(0).unwrap();
    assert!(std::ptr::eq(first, second));
    let node_a = first.subtable(0).unwrap();
    let node_b = second.subtable(0).unwrap();
    assert!(std::ptr::eq(node_a, node_b));
}

#[test]
fn concurrent_readers_observe_the_same_nodes() {
    let buf = gsub_data::gsub_graph();
    let mut collector = ErrorCollector::new();
    let graph = gsub_graph(&buf, &mut collector);
    let addresses: Vec<(usize, usize, usize)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                scope.spawn(|| {
                    let lookup = graph.lookup(1).unwrap();
                    let node = lookup.subtable(0).unwrap();
                    let resolved = node.effective();
                    (
                        lookup as *const _ as usize,
                        node as *const _ as usize,
                        resolved as *const _ as usize,
                    )
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn extension_resolves_transparently() {
    let buf = gsub_data::gsub_graph();
    let mut collector = ErrorCollector::new();
    let graph = gsub_graph(&buf, &mut collector);
    let node = graph.lookup(1).unwrap().subtable(0).unwrap();
    assert!(node.error().is_none());
    assert_eq!(node.lookup_type(), 7);
    let Some(GsubPayload::Extension(extension)) = node.gsub_payload() else {
        panic!("expected extension payload");
    };
    assert_eq!(extension.resolved_type, 1);
    assert_eq!(extension.resolved.lookup_type(), 1);
    // the wrapper has no coverage of its own; consumers see the inner one
    assert_eq!(
        node.coverage().unwrap().get(GlyphId16::new(7)),
        Some(0)
    );
    let effective = node.effective();
    assert!(matches!(
        effective.gsub_payload(),
        Some(GsubPayload::SingleSubst1(_))
    ));
    // a non-extension node is its own effective node
    let plain = graph.lookup(0).unwrap().subtable(0).unwrap();
    assert!(std::ptr::eq(plain.effective(), plain));
}

#[test]
fn extension_in_extension_is_critical() {
    let node = LookupNode::parse(
        Segment::new(gsub_data::EXTENSIONSUBSTFORMAT1_NESTED),
        TableKind::Gsub,
        7,
        MAX_EXTENSION_DEPTH,
    );
    let error = node.error().unwrap();
    assert_eq!(error.severity, Severity::Critical);
    assert_eq!(error.issue, ReadError::NestedExtension);
    assert_eq!(
        error.issue.to_string(),
        "extension cannot reference extension"
    );
    assert!(matches!(node.payload(), Payload::None));

    let node = LookupNode::parse(
        Segment::new(gpos_data::EXTENSIONPOSFORMAT1_NESTED),
        TableKind::Gpos,
        9,
        MAX_EXTENSION_DEPTH,
    );
    assert_eq!(node.error().unwrap().issue, ReadError::NestedExtension);
}

#[test]
fn extension_depth_bound() {
    let node = LookupNode::parse(
        Segment::new(gsub_data::EXTENSIONSUBSTFORMAT1),
        TableKind::Gsub,
        7,
        0,
    );
    let error = node.error().unwrap();
    assert_eq!(error.issue, ReadError::RecursionLimit);
    assert_eq!(error.severity, Severity::Critical);
}

#[test]
fn extension_with_unreadable_inner_subtable() {
    // wrapper is fine but the inner offset points past the end
    let buf = be_buffer! {
        1_u16,              // substFormat
        1_u16,              // extensionLookupType
        8_u32,              // extensionOffset
        1_u16,              // inner substFormat
        64_u16              // inner coverageOffset (out of bounds)
    };
    let node = LookupNode::parse(Segment::new(&buf), TableKind::Gsub, 7, MAX_EXTENSION_DEPTH);
    // the wrapper materializes and mirrors the inner error
    let Some(GsubPayload::Extension(extension)) = node.gsub_payload() else {
        panic!("expected extension payload");
    };
    assert!(extension.resolved.error().is_some());
    assert_eq!(node.error(), extension.resolved.error());
}

#[test]
fn bad_lookup_offsets_are_critical_but_isolated() {
    let buf = gsub_data::gsub_graph_bad_offsets();
    let mut collector = ErrorCollector::new();
    let graph = gsub_graph(&buf, &mut collector);
    assert_eq!(collector.criticals().count(), 2);
    assert!(graph.error().is_some());
    assert_eq!(graph.len(), 2);
    // slots still materialize, carrying their errors
    let lookup = graph.lookup(0).unwrap();
    assert_eq!(lookup.error().unwrap().issue, ReadError::NullOffset);
    let lookup = graph.lookup(1).unwrap();
    assert_eq!(lookup.error().unwrap().issue, ReadError::OutOfBounds);
    // and retrying yields the same failure
    assert!(std::ptr::eq(graph.lookup(1).unwrap(), lookup));
}

#[test]
fn mark_filtering_set_is_read_when_flagged() {
    let buf = gsub_data::gsub_graph_mark_filtering();
    let mut collector = ErrorCollector::new();
    let graph = gsub_graph(&buf, &mut collector);
    let lookup = graph.lookup(0).unwrap();
    assert!(lookup.flag().uses_mark_filtering_set());
    assert_eq!(lookup.mark_filtering_set(), Some(2));
    assert!(lookup.subtable(0).unwrap().error().is_none());

    // without the flag, no set is read
    let buf = gsub_data::gsub_graph();
    let mut collector = ErrorCollector::new();
    let graph = gsub_graph(&buf, &mut collector);
    assert_eq!(graph.lookup(0).unwrap().mark_filtering_set(), None);
}

#[test]
fn gpos_lookup_type_is_masked_at_the_boundary() {
    // a lookup list whose lookup carries a marker bit in the high byte
    let buf = be_buffer! {
        1_u16,              // lookupCount
        4_u16,              // lookupOffsets[0]
        0x0101_u16,         // lookupType (marked single pos)
        0_u16,              // lookupFlag
        1_u16,              // subTableCount
        8_u16,              // subtableOffsets[0]
        1_u16,              // posFormat
        8_u16,              // coverageOffset
        4_u16,              // valueFormat (X_ADVANCE)
        7_u16,              // valueRecord.xAdvance
        1_u16,              // coverageFormat
        1_u16,              // glyphCount
        10_u16              // glyphArray[0]
    };
    let mut collector = ErrorCollector::new();
    let graph = LookupListGraph::new(Segment::new(&buf), TableKind::Gpos, &mut collector);
    let lookup = graph.lookup(0).unwrap();
    assert_eq!(lookup.lookup_type(), 1);
    let node = lookup.subtable(0).unwrap();
    assert!(node.error().is_none());
    assert!(matches!(
        node.gsub_payload(),
        None
    ));
    assert!(matches!(
        node.gpos_payload(),
        Some(GposPayload::SinglePos1(_))
    ));
}

#[test]
fn header_peek_rejects_unknown_major_version() {
    let buf = be_buffer! {
        2_u16,              // majorVersion
        0_u16,              // minorVersion
        0_u16, 0_u16, 10_u16
    };
    let mut collector = ErrorCollector::new();
    let graph = gsub_graph(&buf, &mut collector);
    assert_eq!(graph.len(), 0);
    assert_eq!(
        graph.error().unwrap().issue,
        ReadError::UnsupportedVersion(2)
    );
    assert!(collector.has_critical());
}

#[test]
fn truncated_lookup_list_is_critical() {
    // the count promises more offsets than the segment holds
    let buf = be_buffer! {
        9_u16,              // lookupCount
        4_u16               // lookupOffsets[0], rest missing
    };
    let mut collector = ErrorCollector::new();
    let graph = LookupListGraph::new(Segment::new(&buf), TableKind::Gsub, &mut collector);
    assert_eq!(graph.len(), 0);
    assert_eq!(graph.error().unwrap().severity, Severity::Critical);
}

#[test]
fn truncated_subtable_errors_the_node_only() {
    // lookup 0's subtable offset points at the last two bytes of the table
    let buf = be_buffer! {
        1_u16,              // lookupCount
        4_u16,              // lookupOffsets[0]
        1_u16,              // lookupType
        0_u16,              // lookupFlag
        1_u16,              // subTableCount
        8_u16,              // subtableOffsets[0]
        1_u16               // substFormat, then nothing
    };
    let mut collector = ErrorCollector::new();
    let graph = LookupListGraph::new(Segment::new(&buf), TableKind::Gsub, &mut collector);
    assert!(collector.is_empty());
    let lookup = graph.lookup(0).unwrap();
    assert!(lookup.error().is_none());
    let node = lookup.subtable(0).unwrap();
    let error = node.error().unwrap();
    assert_eq!(error.issue, ReadError::OutOfBounds);
    assert_eq!(error.severity, Severity::Major);
    assert!(matches!(node.payload(), Payload::None));
}

#[test]
fn coverage_count_matches_traversal_for_all_nodes() {
    let buf = gsub_data::gsub_graph();
    let mut collector = ErrorCollector::new();
    let graph = gsub_graph(&buf, &mut collector);
    for (_, lookup) in graph.range() {
        for (_, node) in lookup.range() {
            let coverage = node.coverage().unwrap();
            assert_eq!(coverage.count(), coverage.iter().count());
        }
    }
}

#[test]
fn table_location_out_of_blob_bounds() {
    let blob = [0u8; 4];
    let mut collector = ErrorCollector::new();
    let graph = LookupListGraph::for_table(&blob, 2, 8, TableKind::Gsub, &mut collector);
    assert_eq!(graph.len(), 0);
    assert_eq!(graph.error().unwrap().issue, ReadError::OutOfBounds);
}

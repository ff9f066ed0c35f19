// tests/json_source.rs

mod common;
use crate::common::traces::{json_node, json_trace, write_all};

use serde_json::json;
use tempfile::NamedTempFile;

use tracefeed::config::{ConfigFile, FeederSection, RawConfigFile, TraceSection};
use tracefeed::dag::{CollectiveKind, NodeKind};
use tracefeed::engine::replay;
use tracefeed::errors::FeederError;
use tracefeed::feeder::{FeederOptions, TraceFeeder};
use tracefeed::open_feeder;
use tracefeed::source::{JsonTraceSource, RecordSource};
use tracefeed::types::OrderingPolicy;

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    write_all(&mut file, contents).unwrap();
    file
}

#[test]
fn records_are_handed_out_in_file_order() {
    let doc = json_trace(vec![
        json_node(3, "c", &[1]),
        json_node(1, "a", &[]),
        json_node(2, "b", &[1]),
    ]);
    let mut source = JsonTraceSource::parse(&doc).unwrap();
    assert_eq!(source.len(), 3);

    let ids: Vec<i64> = std::iter::from_fn(|| source.next_record().unwrap())
        .map(|r| r.id())
        .collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert!(source.is_empty());
    assert!(source.next_record().unwrap().is_none());
}

#[test]
fn attributes_are_carried_onto_records() {
    let doc = json!({
        "workload_graph": [{
            "Id": 7,
            "Name": "all_reduce_grad",
            "NodeType": 7,
            "is_cpu_op": false,
            "runtime": 250,
            "comm_type": 0,
            "comm_priority": 3,
            "comm_size": 4096,
            "comm_src": 1,
            "comm_dst": 2,
            "comm_tag": 11,
            "involved_dim": [true, false, true],
            "data_deps": [5, 6]
        }]
    })
    .to_string();

    let mut source = JsonTraceSource::parse(&doc).unwrap();
    let rec = source.next_record().unwrap().unwrap();

    assert_eq!(rec.id(), 7);
    assert_eq!(rec.name(), "all_reduce_grad");
    assert_eq!(rec.kind(), NodeKind::CommCollective);
    assert!(rec.kind().is_comm());
    assert_eq!(rec.collective(), Some(CollectiveKind::AllReduce));
    assert_eq!(rec.runtime, 250);
    assert_eq!(rec.comm_priority, 3);
    assert_eq!(rec.comm_size, 4096);
    assert_eq!((rec.comm_src, rec.comm_dst, rec.comm_tag), (1, 2, 11));
    assert_eq!(rec.data_deps(), &[5, 6]);

    assert_eq!(rec.involved_dim_size(), 3);
    assert_eq!(rec.involved_dim(0), Some(true));
    assert_eq!(rec.involved_dim(1), Some(false));
    assert_eq!(rec.involved_dim(3), None);
}

#[test]
fn missing_optional_fields_default() {
    let doc = r#"{"workload_graph": [{"Id": 1}]}"#;
    let mut source = JsonTraceSource::parse(doc).unwrap();
    let rec = source.next_record().unwrap().unwrap();

    assert_eq!(rec.name(), "");
    assert_eq!(rec.kind(), NodeKind::Invalid);
    assert_eq!(rec.collective(), None);
    assert!(rec.data_deps().is_empty());
    assert_eq!(rec.involved_dim_size(), 0);
}

#[test]
fn unknown_tags_are_preserved() {
    let doc = r#"{"workload_graph": [{"Id": 1, "NodeType": 42}, {"Id": 2, "NodeType": 7, "comm_type": 99}]}"#;
    let mut source = JsonTraceSource::parse(doc).unwrap();

    let first = source.next_record().unwrap().unwrap();
    assert_eq!(first.kind(), NodeKind::Unknown(42));
    assert!(!first.kind().is_comm());

    let second = source.next_record().unwrap().unwrap();
    assert_eq!(second.collective(), Some(CollectiveKind::Unknown(99)));
}

#[test]
fn node_without_id_is_a_json_error() {
    let doc = r#"{"workload_graph": [{"Name": "orphan"}]}"#;
    match JsonTraceSource::parse(doc) {
        Err(FeederError::JsonError(_)) => {}
        other => panic!("expected JsonError, got {:?}", other),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    match JsonTraceSource::open(dir.path().join("absent.json")) {
        Err(FeederError::IoError(_)) => {}
        other => panic!("expected IoError, got {:?}", other),
    }
}

#[test]
fn feeder_over_json_file_replays_in_order() {
    let file = json_file(&json_trace(vec![
        json_node(4, "loss", &[2, 3]),
        json_node(2, "fwd_a", &[1]),
        json_node(3, "fwd_b", &[1]),
        json_node(1, "load", &[]),
    ]));

    let source = JsonTraceSource::open(file.path()).unwrap();
    let mut feeder = TraceFeeder::open(source, FeederOptions::default()).unwrap();
    assert_eq!(feeder.ready_ids(), vec![1]);

    let summary = replay(&mut feeder).unwrap();
    assert_eq!(summary.issued, vec![1, 2, 3, 4]);
}

#[test]
fn open_feeder_dispatches_on_config() {
    let file = json_file(&json_trace(vec![
        json_node(1, "a", &[]),
        json_node(2, "b", &[1]),
    ]));

    let raw = RawConfigFile {
        feeder: FeederSection {
            ordering: OrderingPolicy::Arrival,
            window_size: 0,
        },
        trace: TraceSection {
            path: Some(file.path().to_path_buf()),
            format: None,
        },
    };
    let cfg = ConfigFile::try_from(raw).unwrap();

    let mut feeder = open_feeder(&cfg).unwrap();
    assert_eq!(feeder.loaded_len(), 2);

    let first = feeder.get_next_issuable_node().unwrap().id();
    assert_eq!(first, 1);
    feeder.free_children_nodes(first).unwrap();
    feeder.remove_node(first).unwrap();

    assert_eq!(feeder.lookup_node(2).unwrap().name(), "b");
    let summary = replay(feeder.as_mut()).unwrap();
    assert_eq!(summary.issued, vec![2]);
}

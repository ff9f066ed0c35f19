#![allow(dead_code)]

use tracefeed::dag::NodeRecord;
use tracefeed::feeder::{FeederOptions, TraceFeeder};
use tracefeed::source::VecSource;
use tracefeed::types::{NodeId, OrderingPolicy};

/// Builder for `NodeRecord` to simplify test setup.
pub struct NodeRecordBuilder {
    record: NodeRecord,
}

impl NodeRecordBuilder {
    pub fn new(id: NodeId) -> Self {
        let mut record = NodeRecord::new(id, Vec::new());
        record.name = format!("node_{id}");
        Self { record }
    }

    pub fn after(mut self, parent: NodeId) -> Self {
        let mut deps = self.record.data_deps().to_vec();
        deps.push(parent);
        self.record = self.record.with_data_deps(deps);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.record.name = name.to_string();
        self
    }

    pub fn node_type(mut self, tag: i32) -> Self {
        self.record.node_type = tag;
        self
    }

    pub fn runtime(mut self, runtime: i64) -> Self {
        self.record.runtime = runtime;
        self
    }

    pub fn comm_priority(mut self, priority: i32) -> Self {
        self.record.comm_priority = priority;
        self
    }

    pub fn comm_type(mut self, comm_type: i64) -> Self {
        self.record.comm_type = comm_type;
        self
    }

    pub fn involved_dim(mut self, dims: &[bool]) -> Self {
        self.record.involved_dim = dims.to_vec();
        self
    }

    pub fn build(self) -> NodeRecord {
        self.record
    }
}

/// Shorthand for a bare node with the given declared dependencies.
pub fn node(id: NodeId, deps: &[NodeId]) -> NodeRecord {
    deps.iter()
        .fold(NodeRecordBuilder::new(id), |b, &p| b.after(p))
        .build()
}

/// Feeder over in-memory records with the whole trace in one window.
pub fn feeder_from(records: Vec<NodeRecord>) -> TraceFeeder<VecSource> {
    feeder_with(records, OrderingPolicy::Id, 0)
}

/// Feeder over in-memory records with an explicit ordering and window size.
///
/// Panics if the first window fails to load; use `TraceFeeder::new` when a
/// test expects a load error.
pub fn feeder_with(
    records: Vec<NodeRecord>,
    ordering: OrderingPolicy,
    window_size: usize,
) -> TraceFeeder<VecSource> {
    TraceFeeder::open(
        VecSource::new(records),
        FeederOptions {
            ordering,
            window_size,
        },
    )
    .expect("failed to load first window")
}

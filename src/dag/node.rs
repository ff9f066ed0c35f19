// src/dag/node.rs

//! Node records and their per-node runtime state.

use crate::types::NodeId;

/// Runtime state of a node in the feeder (internal bookkeeping).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Loaded, still waiting on at least one declared dependency
    /// (or not yet seeded into the ready queue).
    Waiting,
    /// Admitted to the ready queue.
    Ready,
    /// Handed to the caller by `get_next_issuable_node`.
    Issued,
    /// The caller reported completion; children have been notified.
    Completed,
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState::Waiting
    }
}

/// Operation kind carried in the trace's `NodeType` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Invalid,
    Metadata,
    MemLoad,
    MemStore,
    Compute,
    CommSend,
    CommRecv,
    CommCollective,
    Unknown(i32),
}

impl From<i32> for NodeKind {
    fn from(tag: i32) -> Self {
        match tag {
            0 => NodeKind::Invalid,
            1 => NodeKind::Metadata,
            2 => NodeKind::MemLoad,
            3 => NodeKind::MemStore,
            4 => NodeKind::Compute,
            5 => NodeKind::CommSend,
            6 => NodeKind::CommRecv,
            7 => NodeKind::CommCollective,
            other => NodeKind::Unknown(other),
        }
    }
}

impl NodeKind {
    pub fn is_comm(&self) -> bool {
        matches!(
            self,
            NodeKind::CommSend | NodeKind::CommRecv | NodeKind::CommCollective
        )
    }
}

/// Collective communication carried in `comm_type` of collective nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectiveKind {
    AllReduce,
    Reduce,
    AllGather,
    Gather,
    Scatter,
    Broadcast,
    AllToAll,
    ReduceScatter,
    ReduceScatterBlock,
    Barrier,
    Unknown(i64),
}

impl From<i64> for CollectiveKind {
    fn from(tag: i64) -> Self {
        match tag {
            0 => CollectiveKind::AllReduce,
            1 => CollectiveKind::Reduce,
            2 => CollectiveKind::AllGather,
            3 => CollectiveKind::Gather,
            4 => CollectiveKind::Scatter,
            5 => CollectiveKind::Broadcast,
            6 => CollectiveKind::AllToAll,
            7 => CollectiveKind::ReduceScatter,
            8 => CollectiveKind::ReduceScatterBlock,
            9 => CollectiveKind::Barrier,
            other => CollectiveKind::Unknown(other),
        }
    }
}

/// One operation of the workload graph.
///
/// Attribute fields are plain data copied from the trace. The graph fields
/// (`data_deps`, `unresolved_parents`, `children`) and the runtime `state`
/// are owned by the feeder and only exposed read-only.
///
/// All cross-node references are ids; the [`NodeStore`](super::NodeStore)
/// is the only owner of records.
#[derive(Debug, Clone, Default)]
pub struct NodeRecord {
    pub id: NodeId,
    pub name: String,
    pub node_type: i32,
    pub is_cpu_op: bool,
    /// Execution cost as recorded in the trace.
    pub runtime: i64,
    pub num_ops: i64,
    pub tensor_size: i64,
    pub comm_type: i64,
    pub comm_priority: i32,
    pub comm_size: i64,
    pub comm_src: i32,
    pub comm_dst: i32,
    pub comm_tag: i32,
    pub involved_dim: Vec<bool>,

    /// Parents that have not completed yet. Shrinks only on completion.
    pub(crate) data_deps: Vec<NodeId>,
    /// Parents not yet present in the store when this node was wired.
    pub(crate) unresolved_parents: Vec<NodeId>,
    /// Nodes that declared this one as a parent and were wired to it.
    pub(crate) children: Vec<NodeId>,
    pub(crate) state: NodeState,
    /// Load sequence number, assigned on insert.
    pub(crate) arrival: u64,
}

impl NodeRecord {
    /// A fresh record with the given id and declared dependencies.
    pub fn new(id: NodeId, data_deps: Vec<NodeId>) -> Self {
        Self {
            id,
            data_deps,
            ..Default::default()
        }
    }

    /// Replace the declared dependencies of a record that is not loaded yet.
    pub fn with_data_deps(mut self, data_deps: Vec<NodeId>) -> Self {
        self.data_deps = data_deps;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::from(self.node_type)
    }

    /// Collective type, only for `CommCollective` nodes.
    pub fn collective(&self) -> Option<CollectiveKind> {
        match self.kind() {
            NodeKind::CommCollective => Some(CollectiveKind::from(self.comm_type)),
            _ => None,
        }
    }

    pub fn involved_dim_size(&self) -> usize {
        self.involved_dim.len()
    }

    /// Whether dimension `i` takes part in this communication.
    ///
    /// Returns `None` when `i` is out of range.
    pub fn involved_dim(&self, i: usize) -> Option<bool> {
        self.involved_dim.get(i).copied()
    }

    /// Declared dependencies that have not completed yet.
    pub fn data_deps(&self) -> &[NodeId] {
        &self.data_deps
    }

    pub fn unresolved_parents(&self) -> &[NodeId] {
        &self.unresolved_parents
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    pub fn arrival(&self) -> u64 {
        self.arrival
    }

    pub fn is_dep_free(&self) -> bool {
        self.data_deps.is_empty()
    }

    pub(crate) fn add_child(&mut self, child: NodeId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }

    /// Drop `parent` from the declared dependencies. Returns `true` if it was
    /// present.
    pub(crate) fn remove_dep(&mut self, parent: NodeId) -> bool {
        match self.data_deps.iter().position(|&p| p == parent) {
            Some(idx) => {
                self.data_deps.remove(idx);
                true
            }
            None => false,
        }
    }
}

// src/dag/ready.rs

//! Queue of nodes whose declared dependencies are all satisfied.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use tracing::debug;

use crate::dag::node::{NodeRecord, NodeState};
use crate::dag::store::NodeStore;
use crate::errors::{FeederError, Result};
use crate::types::{NodeId, OrderingPolicy};

/// Sort key inside the ready queue: smallest key pops first.
///
/// The second component is always the node id, which makes ties
/// deterministic for every policy.
pub type ReadyKey = (i64, NodeId);

/// Compute the ready-queue key of `node` under `policy`.
pub fn ready_key(policy: OrderingPolicy, node: &NodeRecord) -> ReadyKey {
    let primary = match policy {
        OrderingPolicy::Id => 0,
        OrderingPolicy::Arrival => node.arrival as i64,
        OrderingPolicy::Priority => -i64::from(node.comm_priority),
    };
    (primary, node.id)
}

/// Min-heap of ready node ids plus the key each queued id was admitted with.
///
/// The map is authoritative: a heap entry whose key does not match the map
/// is stale (withdrawn, or left over from an earlier admission of a reused
/// id) and gets skipped on pop. Admitting an id that is already queued is a
/// no-op.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    heap: BinaryHeap<Reverse<ReadyKey>>,
    admitted: HashMap<NodeId, ReadyKey>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `key.1` for issuance. Returns `false` if it was already queued.
    pub fn admit(&mut self, key: ReadyKey) -> bool {
        let id = key.1;
        if self.admitted.contains_key(&id) {
            debug!(node = id, "already admitted; ignoring");
            return false;
        }
        self.admitted.insert(id, key);
        self.heap.push(Reverse(key));
        debug!(node = id, key = key.0, "admitted to ready queue");
        true
    }

    /// Pop the next id by the ordering policy.
    ///
    /// Heap entries that no longer match an admitted key are skipped.
    pub fn pop_next(&mut self) -> Result<NodeId> {
        while let Some(Reverse(key)) = self.heap.pop() {
            let id = key.1;
            if self.admitted.get(&id) == Some(&key) {
                self.admitted.remove(&id);
                return Ok(id);
            }
        }
        Err(FeederError::EmptyReady)
    }

    /// Drop `id` from the queue if present. Returns `true` if it was queued.
    pub fn withdraw(&mut self, id: NodeId) -> bool {
        let removed = self.admitted.remove(&id).is_some();
        if removed {
            debug!(node = id, "withdrawn from ready queue");
        }
        removed
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.admitted.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.admitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admitted.is_empty()
    }

    /// Queued ids in pop order, without consuming the queue.
    pub fn snapshot(&self) -> Vec<NodeId> {
        let mut keys: Vec<ReadyKey> = self.admitted.values().copied().collect();
        keys.sort_unstable();
        keys.into_iter().map(|(_, id)| id).collect()
    }
}

/// Admit a stored node, checking that its declared dependencies are empty.
///
/// Marks the node `Ready`. Returns `false` if it was already queued.
pub fn admit_node(
    ready: &mut ReadyQueue,
    store: &mut NodeStore,
    policy: OrderingPolicy,
    id: NodeId,
) -> Result<bool> {
    let node = store.lookup_mut(id)?;
    if !node.data_deps.is_empty() {
        return Err(FeederError::DependenciesOutstanding(id));
    }

    let admitted = ready.admit(ready_key(policy, node));
    node.state = NodeState::Ready;
    Ok(admitted)
}

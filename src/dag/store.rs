// src/dag/store.rs

//! Owning table of loaded node records.

use std::collections::HashMap;

use tracing::debug;

use crate::dag::node::{NodeRecord, NodeState};
use crate::errors::{FeederError, Result};
use crate::types::NodeId;

/// Sole owner of every loaded [`NodeRecord`], keyed by id.
///
/// Other structures (children lists, the resolver's outstanding set, the
/// ready queue) only hold ids. Removing a record leaves those ids dangling;
/// they are pruned lazily by whoever next follows them.
#[derive(Debug, Default)]
pub struct NodeStore {
    nodes: HashMap<NodeId, NodeRecord>,
    /// Next arrival sequence number handed out on insert.
    next_arrival: u64,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, stamping its arrival number and resetting runtime state.
    ///
    /// Duplicate declared dependencies are collapsed so that a single
    /// completion of the parent satisfies them.
    pub fn insert(&mut self, mut record: NodeRecord) -> Result<()> {
        if self.nodes.contains_key(&record.id) {
            return Err(FeederError::DuplicateIdentifier(record.id));
        }

        let mut seen = Vec::with_capacity(record.data_deps.len());
        record.data_deps.retain(|dep| {
            if seen.contains(dep) {
                false
            } else {
                seen.push(*dep);
                true
            }
        });

        record.arrival = self.next_arrival;
        self.next_arrival += 1;
        record.state = NodeState::Waiting;
        record.unresolved_parents.clear();
        record.children.clear();

        debug!(
            node = record.id,
            arrival = record.arrival,
            deps = ?record.data_deps,
            "stored node record"
        );
        self.nodes.insert(record.id, record);
        Ok(())
    }

    pub fn lookup(&self, id: NodeId) -> Result<&NodeRecord> {
        self.nodes.get(&id).ok_or(FeederError::NotFound(id))
    }

    pub fn lookup_mut(&mut self, id: NodeId) -> Result<&mut NodeRecord> {
        self.nodes.get_mut(&id).ok_or(FeederError::NotFound(id))
    }

    /// Evict a record and hand it back.
    pub fn remove(&mut self, id: NodeId) -> Result<NodeRecord> {
        self.nodes.remove(&id).ok_or(FeederError::NotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All stored ids in ascending order.
    pub fn ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values()
    }
}

// src/dag/resolver.rs

//! Wiring of parent → child edges for records that arrive out of order.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, warn};

use crate::dag::node::NodeState;
use crate::dag::store::NodeStore;
use crate::errors::{Result, UnresolvedNode};
use crate::types::NodeId;

/// Tracks nodes whose declared parents have not been loaded yet.
///
/// Topology resolution is independent of runtime readiness: wiring an edge
/// never consumes a declared dependency, only completion does. The one
/// exception is a parent that already completed before its child was wired,
/// whether it is still stored or was retired from an earlier window. That
/// dependency is dropped on the spot since nobody will notify the child
/// again.
#[derive(Debug, Default)]
pub struct ForwardRefResolver {
    /// Nodes with a non-empty `unresolved_parents` list.
    outstanding: BTreeSet<NodeId>,
    /// Ids that completed and were then removed from the store.
    retired: HashSet<NodeId>,
}

impl ForwardRefResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wire a freshly inserted node to whichever of its parents are known.
    ///
    /// Missing parents are remembered on the node and the node joins the
    /// outstanding set.
    pub fn wire(&mut self, store: &mut NodeStore, id: NodeId) -> Result<()> {
        let deps = store.lookup(id)?.data_deps.clone();
        let mut missing = Vec::new();

        for parent in deps {
            if store.contains(parent) {
                link(store, parent, id)?;
            } else if self.retired.contains(&parent) {
                settle_retired(store, parent, id)?;
            } else {
                missing.push(parent);
            }
        }

        if !missing.is_empty() {
            debug!(node = id, missing = ?missing, "forward reference(s) pending");
            store.lookup_mut(id)?.unresolved_parents = missing;
            self.outstanding.insert(id);
        }

        Ok(())
    }

    /// Retry every outstanding node against the parents known right now.
    ///
    /// Returns the number of edges wired by this pass.
    pub fn resolve(&mut self, store: &mut NodeStore) -> Result<usize> {
        let mut wired = 0;
        let pending: Vec<NodeId> = self.outstanding.iter().copied().collect();

        for id in pending {
            let unresolved = match store.lookup(id) {
                Ok(node) => node.unresolved_parents.clone(),
                Err(_) => {
                    warn!(node = id, "outstanding node was removed before resolving; dropping");
                    self.outstanding.remove(&id);
                    continue;
                }
            };

            let mut still_missing = Vec::with_capacity(unresolved.len());
            for parent in unresolved {
                if store.contains(parent) {
                    link(store, parent, id)?;
                    wired += 1;
                } else if self.retired.contains(&parent) {
                    settle_retired(store, parent, id)?;
                } else {
                    still_missing.push(parent);
                }
            }

            let settled = still_missing.is_empty();
            store.lookup_mut(id)?.unresolved_parents = still_missing;
            if settled {
                debug!(node = id, "all forward references resolved");
                self.outstanding.remove(&id);
            }
        }

        Ok(wired)
    }

    /// `true` once no node is waiting on an unseen parent.
    pub fn is_settled(&self) -> bool {
        self.outstanding.is_empty()
    }

    pub fn outstanding_len(&self) -> usize {
        self.outstanding.len()
    }

    pub fn is_outstanding(&self, id: NodeId) -> bool {
        self.outstanding.contains(&id)
    }

    /// Remember that `id` completed and left the store. Children loaded
    /// later treat it as satisfied.
    pub fn retire(&mut self, id: NodeId) {
        self.retired.insert(id);
    }

    /// Forget a retired id because a new record reuses it.
    pub fn reinstate(&mut self, id: NodeId) {
        if self.retired.remove(&id) {
            debug!(node = id, "retired id reused by a new record");
        }
    }

    /// Close out the load phase: report every node still missing parents and
    /// forget them, so each offender is reported exactly once.
    pub fn close_out(&mut self, store: &NodeStore) -> Vec<UnresolvedNode> {
        let mut report = Vec::with_capacity(self.outstanding.len());

        for id in std::mem::take(&mut self.outstanding) {
            if let Ok(node) = store.lookup(id) {
                warn!(
                    node = id,
                    missing = ?node.unresolved_parents,
                    "declared parent(s) never appeared in the trace"
                );
                report.push(UnresolvedNode {
                    node: id,
                    missing_parents: node.unresolved_parents.clone(),
                });
            }
        }

        report
    }
}

/// Record `child` under `parent`, settling the dependency immediately if the
/// parent has already completed.
fn link(store: &mut NodeStore, parent: NodeId, child: NodeId) -> Result<()> {
    let parent_node = store.lookup_mut(parent)?;
    parent_node.add_child(child);
    let parent_done = parent_node.state == NodeState::Completed;

    if parent_done {
        let child_node = store.lookup_mut(child)?;
        child_node.remove_dep(parent);
        debug!(parent, child, "parent already completed; dependency settled at wiring");
    }

    Ok(())
}

/// Drop `parent` from `child`'s declared dependencies: it completed and was
/// removed before `child` was loaded.
fn settle_retired(store: &mut NodeStore, parent: NodeId, child: NodeId) -> Result<()> {
    store.lookup_mut(child)?.remove_dep(parent);
    debug!(parent, child, "parent already retired; dependency settled at wiring");
    Ok(())
}

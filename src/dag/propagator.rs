// src/dag/propagator.rs

//! Completion propagation: the only path by which a node with dependencies
//! becomes ready.

use tracing::{debug, warn};

use crate::dag::node::NodeState;
use crate::dag::ready::{ReadyQueue, admit_node};
use crate::dag::step::CompletionStep;
use crate::dag::store::NodeStore;
use crate::errors::Result;
use crate::types::{NodeId, OrderingPolicy};

/// Applies a completion to the children of a node.
///
/// Borrows the store and the ready queue for the duration of one step.
pub struct CompletionPropagator<'a> {
    store: &'a mut NodeStore,
    ready: &'a mut ReadyQueue,
    policy: OrderingPolicy,
}

impl<'a> CompletionPropagator<'a> {
    pub fn new(store: &'a mut NodeStore, ready: &'a mut ReadyQueue, policy: OrderingPolicy) -> Self {
        Self {
            store,
            ready,
            policy,
        }
    }

    /// Mark `id` complete and release it from each child's declared
    /// dependencies, admitting every child left with none.
    ///
    /// The node itself stays in the store; eviction is a separate call.
    pub fn complete(&mut self, id: NodeId) -> Result<CompletionStep> {
        let node = self.store.lookup_mut(id)?;
        if node.state == NodeState::Completed {
            debug!(node = id, "completion reported again; children already released");
        }
        node.state = NodeState::Completed;
        let children = node.children.clone();

        let mut step = CompletionStep {
            completed: id,
            ..Default::default()
        };

        for child_id in children {
            let Ok(child) = self.store.lookup_mut(child_id) else {
                warn!(parent = id, child = child_id, "child no longer loaded; pruning edge");
                step.pruned_children.push(child_id);
                continue;
            };

            if !child.remove_dep(id) {
                continue;
            }

            if child.data_deps.is_empty() && child.state == NodeState::Waiting {
                if admit_node(self.ready, self.store, self.policy, child_id)? {
                    step.newly_ready.push(child_id);
                }
            } else {
                debug!(
                    parent = id,
                    child = child_id,
                    remaining = child.data_deps.len(),
                    "dependency released"
                );
            }
        }

        if !step.pruned_children.is_empty() {
            let node = self.store.lookup_mut(id)?;
            node.children.retain(|c| !step.pruned_children.contains(c));
        }

        Ok(step)
    }
}

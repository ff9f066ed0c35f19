// src/dag/step.rs

//! Result type for a single completion step.

use crate::types::NodeId;

/// Structured result of reporting one node as complete.
///
/// Useful for tests that want to step the graph by hand and check exactly
/// what a completion unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionStep {
    /// The node that was reported complete.
    pub completed: NodeId,
    /// Children whose last declared dependency was this node, in the order
    /// they were admitted.
    pub newly_ready: Vec<NodeId>,
    /// Child ids that were no longer in the store and got dropped from the
    /// children list.
    pub pruned_children: Vec<NodeId>,
}

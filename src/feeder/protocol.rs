// src/feeder/protocol.rs

//! The issuance contract between a trace backend and its caller.
//!
//! A simulator drives any backend through the same loop:
//!
//! 1. `get_next_issuable_node` to obtain a node with no outstanding
//!    dependencies (or [`FeederError::EmptyReady`] when nothing is ready),
//! 2. execute it,
//! 3. `free_children_nodes` to report completion,
//! 4. `remove_node` once the record is no longer needed.
//!
//! The backend is chosen once when the feeder is constructed; callers hold a
//! `Box<dyn IssuanceProtocol>` and never branch on the trace format again.
//!
//! [`FeederError::EmptyReady`]: crate::errors::FeederError::EmptyReady

use crate::dag::NodeRecord;
use crate::errors::Result;
use crate::types::NodeId;

/// Trait abstracting how a trace is fed to a simulator.
///
/// Production code uses [`TraceFeeder`](super::TraceFeeder); a backend
/// around an external trace library can implement the same contract.
pub trait IssuanceProtocol {
    /// Pop the next ready node and mark it issued.
    ///
    /// Fails with `EmptyReady` when no node is ready right now. That is not
    /// exhaustion; check [`has_nodes_to_issue`](Self::has_nodes_to_issue).
    fn get_next_issuable_node(&mut self) -> Result<&NodeRecord>;

    /// Read a loaded node's record.
    fn lookup_node(&self, id: NodeId) -> Result<&NodeRecord>;

    /// Report that `id` finished executing, releasing its children.
    fn free_children_nodes(&mut self, id: NodeId) -> Result<()>;

    /// Evict `id`. Call only after `free_children_nodes(id)`, or its
    /// children are never released.
    fn remove_node(&mut self, id: NodeId) -> Result<()>;

    /// Put a popped node back in the ready queue.
    fn push_back_issuable_node(&mut self, id: NodeId) -> Result<()>;

    /// `true` while any node is loaded or queued.
    fn has_nodes_to_issue(&self) -> bool;

    /// Number of records currently loaded.
    fn loaded_len(&self) -> usize;

    /// Ingest another window of records; returns how many were read.
    fn load_next_window(&mut self) -> Result<usize>;
}

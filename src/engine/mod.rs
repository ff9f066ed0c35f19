// src/engine/mod.rs

//! Drivers built on top of the issuance protocol.
//!
//! The feeder only answers "what can run now" and "what does completing X
//! unlock". [`replay`] is the simplest possible caller: it issues every node
//! as soon as it is ready, completes it at once and evicts it, which yields a
//! valid topological order of the trace.

pub mod replay;

pub use replay::{ReplaySummary, replay, replay_with};

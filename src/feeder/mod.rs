// src/feeder/mod.rs

//! Simulator-facing issuance protocol.
//!
//! - [`protocol`] defines the [`IssuanceProtocol`] contract every trace
//!   backend implements.
//! - [`trace_feeder`] is the in-crate backend built on the `dag` engine.

pub mod protocol;
pub mod trace_feeder;

use crate::types::OrderingPolicy;

pub use protocol::IssuanceProtocol;
pub use trace_feeder::TraceFeeder;

/// Construction-time options for a [`TraceFeeder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeederOptions {
    /// Order in which ready nodes are handed out.
    pub ordering: OrderingPolicy,
    /// Records per load window; `0` loads the whole trace at once.
    pub window_size: usize,
}

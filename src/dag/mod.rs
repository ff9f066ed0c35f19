// src/dag/mod.rs

//! Dependency graph construction and readiness tracking.
//!
//! - [`node`] defines node records and their runtime state.
//! - [`store`] owns every loaded record, keyed by id.
//! - [`resolver`] wires parent/child edges for records that arrive before
//!   their parents.
//! - [`ready`] is the deterministic queue of nodes with no outstanding
//!   dependencies.
//! - [`loader`] ingests records window by window and seeds the ready queue.
//! - [`propagator`] releases children when a node completes.
//! - [`step`] defines the result type for completion steps.

pub mod loader;
pub mod node;
pub mod propagator;
pub mod ready;
pub mod resolver;
pub mod step;
pub mod store;

pub use loader::WindowLoader;
pub use node::{CollectiveKind, NodeKind, NodeRecord, NodeState};
pub use propagator::CompletionPropagator;
pub use ready::{ReadyKey, ReadyQueue};
pub use resolver::ForwardRefResolver;
pub use step::CompletionStep;
pub use store::NodeStore;

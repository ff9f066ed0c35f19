// src/errors.rs

//! Crate-wide error type and result alias.

use std::fmt;

use thiserror::Error;

use crate::types::NodeId;

/// A node whose declared parents never showed up in the trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedNode {
    pub node: NodeId,
    pub missing_parents: Vec<NodeId>,
}

impl fmt::Display for UnresolvedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {} (missing parents {:?})", self.node, self.missing_parents)
    }
}

#[derive(Error, Debug)]
pub enum FeederError {
    #[error("Duplicate node identifier: {0}")]
    DuplicateIdentifier(NodeId),

    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Unresolvable dependencies: {}", format_unresolved(.nodes))]
    UnresolvableDependency { nodes: Vec<UnresolvedNode> },

    #[error("No node is ready to issue")]
    EmptyReady,

    #[error("Node {0} still has outstanding dependencies")]
    DependenciesOutstanding(NodeId),

    #[error("Replay stalled with {outstanding} node(s) that can never become ready")]
    Stalled { outstanding: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unsupported trace format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FeederError {
    /// `true` for the transient "nothing ready right now" condition.
    pub fn is_empty_ready(&self) -> bool {
        matches!(self, FeederError::EmptyReady)
    }
}

fn format_unresolved(nodes: &[UnresolvedNode]) -> String {
    nodes
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, FeederError>;

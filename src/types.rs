use std::str::FromStr;
use serde::Deserialize;

/// Identifier of a node in the execution trace.
pub type NodeId = i64;

/// Order in which ready nodes are handed out.
///
/// Every policy breaks ties by ascending node id, so issuance order is fully
/// determined by the admission set and the policy.
///
/// - `Id`: ascending node id (default).
/// - `Arrival`: the order in which records were loaded from the trace.
/// - `Priority`: highest `comm_priority` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderingPolicy {
    Id,
    Arrival,
    Priority,
}

impl Default for OrderingPolicy {
    fn default() -> Self {
        OrderingPolicy::Id
    }
}

impl FromStr for OrderingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(OrderingPolicy::Id),
            "arrival" => Ok(OrderingPolicy::Arrival),
            "priority" => Ok(OrderingPolicy::Priority),
            other => Err(format!(
                "invalid ordering: {other} (expected \"id\", \"arrival\" or \"priority\")"
            )),
        }
    }
}

/// On-disk encoding of a trace file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceFormat {
    /// `{"workload_graph": [...]}` document, read in one go.
    Json,
}

impl TraceFormat {
    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(TraceFormat::Json),
            _ => None,
        }
    }
}

impl FromStr for TraceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraceFormat::from_extension(s.trim())
            .ok_or_else(|| format!("invalid trace format: {s} (expected \"json\")"))
    }
}

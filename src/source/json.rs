// src/source/json.rs

//! JSON trace reader.
//!
//! Expected layout:
//!
//! ```json
//! {
//!   "workload_graph": [
//!     { "Id": 1, "Name": "matmul", "NodeType": 4, "runtime": 120,
//!       "data_deps": [] },
//!     { "Id": 2, "Name": "all_reduce", "NodeType": 7, "comm_type": 0,
//!       "comm_size": 4096, "involved_dim": [true, false],
//!       "data_deps": [1] }
//!   ]
//! }
//! ```
//!
//! Only `Id` is required; every other field defaults to zero / empty.

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::dag::NodeRecord;
use crate::errors::Result;
use crate::source::RecordSource;
use crate::types::NodeId;

#[derive(Debug, Deserialize)]
struct JsonTrace {
    #[serde(default)]
    workload_graph: Vec<JsonNode>,
}

#[derive(Debug, Deserialize)]
struct JsonNode {
    #[serde(rename = "Id")]
    id: NodeId,
    #[serde(rename = "Name", default)]
    name: String,
    #[serde(rename = "NodeType", default)]
    node_type: i32,
    #[serde(default)]
    is_cpu_op: bool,
    #[serde(default)]
    runtime: i64,
    #[serde(default)]
    num_ops: i64,
    #[serde(default)]
    tensor_size: i64,
    #[serde(default)]
    comm_type: i64,
    #[serde(default)]
    comm_priority: i32,
    #[serde(default)]
    comm_size: i64,
    #[serde(default)]
    comm_src: i32,
    #[serde(default)]
    comm_dst: i32,
    #[serde(default)]
    comm_tag: i32,
    #[serde(default)]
    involved_dim: Vec<bool>,
    #[serde(default)]
    data_deps: Vec<NodeId>,
}

impl From<JsonNode> for NodeRecord {
    fn from(n: JsonNode) -> Self {
        let mut record = NodeRecord::new(n.id, n.data_deps);
        record.name = n.name;
        record.node_type = n.node_type;
        record.is_cpu_op = n.is_cpu_op;
        record.runtime = n.runtime;
        record.num_ops = n.num_ops;
        record.tensor_size = n.tensor_size;
        record.comm_type = n.comm_type;
        record.comm_priority = n.comm_priority;
        record.comm_size = n.comm_size;
        record.comm_src = n.comm_src;
        record.comm_dst = n.comm_dst;
        record.comm_tag = n.comm_tag;
        record.involved_dim = n.involved_dim;
        record
    }
}

/// Whole-file JSON trace: parsed once at open, then handed out in order.
#[derive(Debug)]
pub struct JsonTraceSource {
    nodes: VecDeque<JsonNode>,
}

impl JsonTraceSource {
    /// Read and parse a trace file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let source = Self::parse(&contents)?;
        debug!(path = %path.display(), nodes = source.len(), "opened JSON trace");
        Ok(source)
    }

    /// Parse a trace held in memory.
    pub fn parse(contents: &str) -> Result<Self> {
        let trace: JsonTrace = serde_json::from_str(contents)?;
        Ok(Self {
            nodes: trace.workload_graph.into(),
        })
    }

    /// Records not handed out yet.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl RecordSource for JsonTraceSource {
    fn next_record(&mut self) -> Result<Option<NodeRecord>> {
        Ok(self.nodes.pop_front().map(NodeRecord::from))
    }
}

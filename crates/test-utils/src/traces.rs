#![allow(dead_code)]

use std::io::Write;

use serde_json::{json, Value};

/// One `workload_graph` entry in the JSON trace layout.
pub fn json_node(id: i64, name: &str, deps: &[i64]) -> Value {
    json!({
        "Id": id,
        "Name": name,
        "NodeType": 4,
        "runtime": 10,
        "data_deps": deps,
    })
}

/// A full JSON trace document from its entries.
pub fn json_trace(nodes: Vec<Value>) -> String {
    json!({ "workload_graph": nodes }).to_string()
}

/// Write `contents` to `file` and flush it.
pub fn write_all(file: &mut impl Write, contents: &str) -> anyhow::Result<()> {
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(())
}

// src/source/mod.rs

//! Input boundary: where decoded node records come from.
//!
//! The engine pulls records one at a time through [`RecordSource`] and does
//! not care how they were encoded on disk.
//!
//! - [`VecSource`] hands out an in-memory list (tests, programmatic use).
//! - [`json::JsonTraceSource`] reads the `workload_graph` JSON layout.

pub mod json;

use std::collections::VecDeque;

use crate::dag::NodeRecord;
use crate::errors::Result;

pub use json::JsonTraceSource;

/// Pull interface over an ordered sequence of decoded records.
pub trait RecordSource {
    /// Next record in trace order, or `None` at end of trace.
    fn next_record(&mut self) -> Result<Option<NodeRecord>>;
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn next_record(&mut self) -> Result<Option<NodeRecord>> {
        (**self).next_record()
    }
}

/// Records held in memory, handed out front to back.
#[derive(Debug, Default)]
pub struct VecSource {
    records: VecDeque<NodeRecord>,
}

impl VecSource {
    pub fn new(records: Vec<NodeRecord>) -> Self {
        Self {
            records: records.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl From<Vec<NodeRecord>> for VecSource {
    fn from(records: Vec<NodeRecord>) -> Self {
        Self::new(records)
    }
}

impl RecordSource for VecSource {
    fn next_record(&mut self) -> Result<Option<NodeRecord>> {
        Ok(self.records.pop_front())
    }
}

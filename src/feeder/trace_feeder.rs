// src/feeder/trace_feeder.rs

use tracing::{debug, info, warn};

use crate::dag::ready::admit_node;
use crate::dag::{
    CompletionPropagator, CompletionStep, NodeRecord, NodeState, NodeStore, ReadyQueue,
    WindowLoader,
};
use crate::errors::Result;
use crate::feeder::{FeederOptions, IssuanceProtocol};
use crate::source::RecordSource;
use crate::types::{NodeId, OrderingPolicy};

/// Trace feeder built on the in-crate dependency engine.
///
/// It owns:
/// - the node store (sole owner of every loaded record)
/// - the ready queue
/// - the window loader, which owns the record source and the
///   forward-reference resolver
///
/// Everything is single-threaded and synchronous. Wrap the feeder in a mutex
/// if several threads need to drive it.
#[derive(Debug)]
pub struct TraceFeeder<S> {
    store: NodeStore,
    ready: ReadyQueue,
    loader: WindowLoader<S>,
    ordering: OrderingPolicy,
}

impl<S: RecordSource> TraceFeeder<S> {
    /// Construct a feeder without loading anything yet.
    pub fn new(source: S, options: FeederOptions) -> Self {
        Self {
            store: NodeStore::new(),
            ready: ReadyQueue::new(),
            loader: WindowLoader::new(source, options.window_size),
            ordering: options.ordering,
        }
    }

    /// Construct a feeder and load its first window.
    pub fn open(source: S, options: FeederOptions) -> Result<Self> {
        let mut feeder = Self::new(source, options);
        feeder.load_next_window()?;
        Ok(feeder)
    }

    pub fn ordering(&self) -> OrderingPolicy {
        self.ordering
    }

    /// Ingest the next window and seed the ready queue.
    pub fn load_next_window(&mut self) -> Result<usize> {
        self.loader
            .load_next(&mut self.store, &mut self.ready, self.ordering)
    }

    /// Pop the next ready node, mark it `Issued` and return its record.
    ///
    /// Queue entries whose record is no longer stored are dropped.
    pub fn get_next_issuable_node(&mut self) -> Result<&NodeRecord> {
        let id = loop {
            let id = self.ready.pop_next()?;
            if self.store.contains(id) {
                break id;
            }
            warn!(node = id, "stale ready entry; record already removed");
        };
        let node = self.store.lookup_mut(id)?;
        debug_assert!(node.is_dep_free(), "issued node {id} has outstanding deps");
        node.state = NodeState::Issued;
        debug!(node = id, name = %node.name, "issuing node");
        Ok(&*node)
    }

    pub fn lookup_node(&self, id: NodeId) -> Result<&NodeRecord> {
        self.store.lookup(id)
    }

    /// Report completion of `id` (production API).
    pub fn free_children_nodes(&mut self, id: NodeId) -> Result<()> {
        self.step_completion(id).map(|_| ())
    }

    /// Manual-step variant of `free_children_nodes` that returns a rich
    /// [`CompletionStep`].
    pub fn step_completion(&mut self, id: NodeId) -> Result<CompletionStep> {
        if self.ready.contains(id) {
            warn!(node = id, "completion reported for a node that was never issued");
            self.ready.withdraw(id);
        }

        let mut propagator =
            CompletionPropagator::new(&mut self.store, &mut self.ready, self.ordering);
        let step = propagator.complete(id)?;
        debug!(
            node = id,
            newly_ready = ?step.newly_ready,
            "completion propagated"
        );
        Ok(step)
    }

    /// Evict `id` from the store and return its record.
    ///
    /// Ids of this node left in other nodes' children lists are pruned the
    /// next time those parents complete. A completed node is remembered as
    /// retired, so children arriving in later windows do not wait on it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<NodeRecord> {
        let record = self.store.remove(id)?;
        if record.state == NodeState::Completed {
            self.loader.retire(id);
        } else {
            warn!(
                node = id,
                state = ?record.state,
                "removing a node whose completion was never reported; its children stay blocked"
            );
        }
        self.ready.withdraw(id);
        Ok(record)
    }

    /// Put `id` back in the ready queue (e.g. the caller popped it but could
    /// not issue it yet).
    pub fn push_back_issuable_node(&mut self, id: NodeId) -> Result<()> {
        admit_node(&mut self.ready, &mut self.store, self.ordering, id)?;
        Ok(())
    }

    /// `true` while the store or the ready queue still holds a node.
    pub fn has_nodes_to_issue(&self) -> bool {
        !(self.store.is_empty() && self.ready.is_empty())
    }

    /// Whether `id` is currently queued for issuance.
    pub fn is_ready(&self, id: NodeId) -> bool {
        self.ready.contains(id)
    }

    /// Ready ids in the order they would be issued.
    pub fn ready_ids(&self) -> Vec<NodeId> {
        self.ready.snapshot()
    }

    /// Number of records currently held in the store.
    pub fn loaded_len(&self) -> usize {
        self.store.len()
    }

    /// Ids of all loaded records, ascending.
    pub fn loaded_ids(&self) -> Vec<NodeId> {
        self.store.ids()
    }

    /// `true` once the record source reported end of trace.
    pub fn is_source_exhausted(&self) -> bool {
        self.loader.is_exhausted()
    }

    pub fn windows_loaded(&self) -> usize {
        self.loader.windows_loaded()
    }

    /// Nodes still waiting on a parent that has not been loaded.
    pub fn outstanding_forward_refs(&self) -> usize {
        self.loader.resolver().outstanding_len()
    }

    /// Log a one-line summary of the feeder state.
    pub fn log_summary(&self) {
        info!(
            loaded = self.store.len(),
            ready = self.ready.len(),
            windows = self.loader.windows_loaded(),
            exhausted = self.loader.is_exhausted(),
            "feeder state"
        );
    }
}

impl<S: RecordSource> IssuanceProtocol for TraceFeeder<S> {
    fn get_next_issuable_node(&mut self) -> Result<&NodeRecord> {
        TraceFeeder::get_next_issuable_node(self)
    }

    fn lookup_node(&self, id: NodeId) -> Result<&NodeRecord> {
        TraceFeeder::lookup_node(self, id)
    }

    fn free_children_nodes(&mut self, id: NodeId) -> Result<()> {
        TraceFeeder::free_children_nodes(self, id)
    }

    fn remove_node(&mut self, id: NodeId) -> Result<()> {
        TraceFeeder::remove_node(self, id).map(|_| ())
    }

    fn push_back_issuable_node(&mut self, id: NodeId) -> Result<()> {
        TraceFeeder::push_back_issuable_node(self, id)
    }

    fn has_nodes_to_issue(&self) -> bool {
        TraceFeeder::has_nodes_to_issue(self)
    }

    fn loaded_len(&self) -> usize {
        TraceFeeder::loaded_len(self)
    }

    fn load_next_window(&mut self) -> Result<usize> {
        TraceFeeder::load_next_window(self)
    }
}

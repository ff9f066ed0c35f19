// src/dag/loader.rs

//! Batch ingestion of trace records.

use tracing::{debug, info};

use crate::dag::node::NodeState;
use crate::dag::ready::{ReadyQueue, admit_node};
use crate::dag::resolver::ForwardRefResolver;
use crate::dag::store::NodeStore;
use crate::errors::{FeederError, Result};
use crate::source::RecordSource;
use crate::types::{NodeId, OrderingPolicy};

/// Pulls records from a [`RecordSource`] one window at a time.
///
/// A window is `window_size` records (all remaining records when
/// `window_size == 0`), extended for as long as some loaded node is still
/// waiting on a parent that has not been read yet.
#[derive(Debug)]
pub struct WindowLoader<S> {
    source: S,
    resolver: ForwardRefResolver,
    window_size: usize,
    exhausted: bool,
    windows_loaded: usize,
}

impl<S: RecordSource> WindowLoader<S> {
    pub fn new(source: S, window_size: usize) -> Self {
        Self {
            source,
            resolver: ForwardRefResolver::new(),
            window_size,
            exhausted: false,
            windows_loaded: 0,
        }
    }

    /// `true` once the source has reported end of trace.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn windows_loaded(&self) -> usize {
        self.windows_loaded
    }

    pub fn resolver(&self) -> &ForwardRefResolver {
        &self.resolver
    }

    /// Record that `id` completed and was evicted, so records in later
    /// windows that name it as a parent are not held back.
    pub fn retire(&mut self, id: NodeId) {
        self.resolver.retire(id);
    }

    /// Load the next window into `store`, then seed `ready` with every
    /// dependency-free node that has not been admitted or issued yet.
    ///
    /// Returns the number of records read (0 once the source is exhausted).
    /// If the source runs dry while forward references are still pending,
    /// the seeding still happens and then every offending node is reported
    /// in a single [`FeederError::UnresolvableDependency`].
    pub fn load_next(
        &mut self,
        store: &mut NodeStore,
        ready: &mut ReadyQueue,
        policy: OrderingPolicy,
    ) -> Result<usize> {
        if self.exhausted {
            return Ok(0);
        }

        let mut read = 0usize;
        while self.wants_more(read) {
            let Some(record) = self.source.next_record()? else {
                self.exhausted = true;
                debug!(read, "trace source exhausted");
                break;
            };

            let id = record.id;
            store.insert(record)?;
            self.resolver.reinstate(id);
            self.resolver.wire(store, id)?;
            if !self.resolver.is_settled() {
                self.resolver.resolve(store)?;
            }
            read += 1;
        }

        let unresolved = if self.exhausted && !self.resolver.is_settled() {
            self.resolver.close_out(store)
        } else {
            Vec::new()
        };

        let seeded = seed_ready(store, ready, policy)?;
        if read > 0 {
            self.windows_loaded += 1;
        }

        info!(
            window = self.windows_loaded,
            records = read,
            seeded = seeded.len(),
            loaded = store.len(),
            "loaded trace window"
        );

        if unresolved.is_empty() {
            Ok(read)
        } else {
            Err(FeederError::UnresolvableDependency { nodes: unresolved })
        }
    }

    fn wants_more(&self, read: usize) -> bool {
        self.window_size == 0 || read < self.window_size || !self.resolver.is_settled()
    }
}

/// Admit every stored node that is waiting with no declared dependencies.
///
/// Ids are visited in ascending order so that admission order does not
/// depend on hash iteration.
fn seed_ready(
    store: &mut NodeStore,
    ready: &mut ReadyQueue,
    policy: OrderingPolicy,
) -> Result<Vec<NodeId>> {
    let candidates: Vec<NodeId> = store
        .ids()
        .into_iter()
        .filter(|id| {
            store
                .lookup(*id)
                .map(|n| n.state == NodeState::Waiting && n.is_dep_free())
                .unwrap_or(false)
        })
        .collect();

    let mut seeded = Vec::with_capacity(candidates.len());
    for id in candidates {
        if admit_node(ready, store, policy, id)? {
            seeded.push(id);
        }
    }
    Ok(seeded)
}

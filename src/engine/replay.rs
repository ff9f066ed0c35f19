// src/engine/replay.rs

//! Zero-latency replay of a trace through an [`IssuanceProtocol`].

use tracing::{debug, info, warn};

use crate::dag::NodeRecord;
use crate::errors::{FeederError, Result};
use crate::feeder::IssuanceProtocol;
use crate::types::NodeId;

/// What a replay did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Node ids in the order they were issued.
    pub issued: Vec<NodeId>,
    /// Windows loaded by the replay itself (not counting any window the
    /// feeder loaded when it was opened).
    pub extra_windows: usize,
}

/// Replay `feeder` to the end without observing individual nodes.
pub fn replay(feeder: &mut dyn IssuanceProtocol) -> Result<ReplaySummary> {
    replay_with(feeder, |_| {})
}

/// Replay `feeder` to the end, calling `on_issue` for every issued node
/// before its completion is reported.
///
/// Every issued node is completed and removed immediately. When nothing is
/// ready, the next window is loaded; if the source is exhausted while nodes
/// remain, the replay fails with [`FeederError::Stalled`].
pub fn replay_with<F>(feeder: &mut dyn IssuanceProtocol, mut on_issue: F) -> Result<ReplaySummary>
where
    F: FnMut(&NodeRecord),
{
    let mut summary = ReplaySummary::default();

    loop {
        if !feeder.has_nodes_to_issue() {
            if feeder.load_next_window()? == 0 {
                break;
            }
            summary.extra_windows += 1;
            continue;
        }

        let id = match feeder.get_next_issuable_node() {
            Ok(node) => {
                on_issue(node);
                node.id()
            }
            Err(FeederError::EmptyReady) => {
                if feeder.load_next_window()? > 0 {
                    summary.extra_windows += 1;
                    continue;
                }
                let outstanding = feeder.loaded_len();
                warn!(outstanding, "nothing ready and trace exhausted");
                return Err(FeederError::Stalled { outstanding });
            }
            Err(e) => return Err(e),
        };

        feeder.free_children_nodes(id)?;
        feeder.remove_node(id)?;
        debug!(node = id, "replayed node");
        summary.issued.push(id);
    }

    info!(
        issued = summary.issued.len(),
        extra_windows = summary.extra_windows,
        "replay finished"
    );
    Ok(summary)
}

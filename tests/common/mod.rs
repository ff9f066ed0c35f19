#![allow(dead_code)]

pub use tracefeed_test_utils::{builders, init_tracing, traces};

use tracefeed::feeder::TraceFeeder;
use tracefeed::source::VecSource;
use tracefeed::types::NodeId;

/// Issue, complete and remove the next ready node, returning its id.
pub fn issue_and_retire(feeder: &mut TraceFeeder<VecSource>) -> NodeId {
    let id = feeder
        .get_next_issuable_node()
        .expect("expected a ready node")
        .id();
    feeder.free_children_nodes(id).expect("completion failed");
    feeder.remove_node(id).expect("removal failed");
    id
}

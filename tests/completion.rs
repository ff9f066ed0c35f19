// tests/completion.rs

mod common;
use crate::common::builders::{feeder_from, node};
use crate::common::{init_tracing, issue_and_retire};

use tracefeed::dag::NodeState;
use tracefeed::errors::FeederError;

/// A(1) <- C(3) <- D(4), where D also depends on A directly.
fn diamond_tail() -> Vec<tracefeed::dag::NodeRecord> {
    vec![node(1, &[]), node(3, &[1]), node(4, &[1, 3])]
}

#[test]
fn completing_a_parent_releases_only_fully_satisfied_children() {
    init_tracing();
    let mut feeder = feeder_from(diamond_tail());
    assert_eq!(feeder.ready_ids(), vec![1]);

    let a = feeder.get_next_issuable_node().unwrap().id();
    assert_eq!(a, 1);
    assert_eq!(feeder.lookup_node(1).unwrap().state(), NodeState::Issued);

    let step = feeder.step_completion(a).unwrap();
    assert_eq!(step.completed, 1);
    assert_eq!(step.newly_ready, vec![3]);
    assert!(step.pruned_children.is_empty());
    assert!(feeder.is_ready(3));
    assert!(!feeder.is_ready(4));
    assert_eq!(feeder.lookup_node(4).unwrap().data_deps(), &[3]);

    feeder.remove_node(a).unwrap();
    let c = feeder.get_next_issuable_node().unwrap().id();
    assert_eq!(c, 3);
    let step = feeder.step_completion(c).unwrap();
    assert_eq!(step.newly_ready, vec![4]);
    assert!(feeder.is_ready(4));
}

#[test]
fn completion_does_not_evict_the_node() {
    let mut feeder = feeder_from(diamond_tail());
    let a = feeder.get_next_issuable_node().unwrap().id();
    feeder.free_children_nodes(a).unwrap();

    let record = feeder.lookup_node(a).unwrap();
    assert_eq!(record.state(), NodeState::Completed);
    assert_eq!(feeder.loaded_len(), 3);
}

#[test]
fn completion_of_unknown_node_is_not_found() {
    let mut feeder = feeder_from(diamond_tail());
    assert!(matches!(
        feeder.free_children_nodes(42),
        Err(FeederError::NotFound(42))
    ));
}

#[test]
fn completing_twice_does_not_double_release() {
    let mut feeder = feeder_from(vec![node(1, &[]), node(2, &[1])]);
    let a = feeder.get_next_issuable_node().unwrap().id();

    let first = feeder.step_completion(a).unwrap();
    assert_eq!(first.newly_ready, vec![2]);

    let second = feeder.step_completion(a).unwrap();
    assert!(second.newly_ready.is_empty());
    assert_eq!(feeder.ready_ids(), vec![2]);
}

#[test]
fn duplicate_declared_dependency_is_released_by_one_completion() {
    let mut feeder = feeder_from(vec![node(1, &[]), node(2, &[1, 1])]);
    let a = feeder.get_next_issuable_node().unwrap().id();

    let step = feeder.step_completion(a).unwrap();
    assert_eq!(step.newly_ready, vec![2]);
}

#[test]
fn removed_child_is_pruned_from_parent_on_completion() {
    let mut feeder = feeder_from(vec![node(1, &[]), node(2, &[1]), node(3, &[1])]);

    feeder.remove_node(2).unwrap();
    let a = feeder.get_next_issuable_node().unwrap().id();
    let step = feeder.step_completion(a).unwrap();

    assert_eq!(step.pruned_children, vec![2]);
    assert_eq!(step.newly_ready, vec![3]);
    assert_eq!(feeder.lookup_node(1).unwrap().children(), &[3]);
}

#[test]
fn remove_before_issue_withdraws_from_ready_queue() {
    let mut feeder = feeder_from(vec![node(1, &[]), node(2, &[])]);

    feeder.remove_node(1).unwrap();
    assert!(!feeder.is_ready(1));
    assert_eq!(feeder.get_next_issuable_node().unwrap().id(), 2);
    assert!(matches!(feeder.remove_node(1), Err(FeederError::NotFound(1))));
}

#[test]
fn push_back_requeues_a_popped_node() {
    let mut feeder = feeder_from(vec![node(1, &[]), node(2, &[1])]);

    let a = feeder.get_next_issuable_node().unwrap().id();
    assert!(feeder.ready_ids().is_empty());

    feeder.push_back_issuable_node(a).unwrap();
    assert_eq!(feeder.ready_ids(), vec![1]);
    assert_eq!(feeder.lookup_node(1).unwrap().state(), NodeState::Ready);

    // Pushing back twice keeps a single entry.
    feeder.push_back_issuable_node(a).unwrap();
    assert_eq!(feeder.ready_ids(), vec![1]);

    assert!(matches!(
        feeder.push_back_issuable_node(2),
        Err(FeederError::DependenciesOutstanding(2))
    ));
    assert!(matches!(
        feeder.push_back_issuable_node(9),
        Err(FeederError::NotFound(9))
    ));
}

#[test]
fn exhaustion_after_everything_is_issued_completed_and_removed() {
    let mut feeder = feeder_from(diamond_tail());

    let order: Vec<_> = (0..3).map(|_| issue_and_retire(&mut feeder)).collect();
    assert_eq!(order, vec![1, 3, 4]);

    assert!(!feeder.has_nodes_to_issue());
    match feeder.get_next_issuable_node() {
        Err(e) => assert!(e.is_empty_ready(), "unexpected error: {e:?}"),
        Ok(node) => panic!("expected EmptyReady, got node {}", node.id()),
    }
}

#[test]
fn stall_is_empty_ready_not_exhaustion() {
    let mut feeder = feeder_from(vec![node(1, &[]), node(2, &[1])]);
    let a = feeder.get_next_issuable_node().unwrap().id();
    assert_eq!(a, 1);

    // 1 is in flight: nothing is ready but the trace is not exhausted.
    assert!(matches!(
        feeder.get_next_issuable_node(),
        Err(FeederError::EmptyReady)
    ));
    assert!(feeder.has_nodes_to_issue());
}

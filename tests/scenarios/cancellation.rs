//! Test: cooperative cancellation of an active run

use crate::helpers::*;
use nodeflow::core::{NodeRunState, RunStatus};
use nodeflow::engine::{ExecutionEvent, GraphSession};
use std::time::Duration;

#[tokio::test]
async fn test_cancel_interrupts_an_in_flight_node() {
    let session = GraphSession::new(
        MockBackend::new(vec!["never delivered".to_string()])
            .with_delay(Duration::from_secs(30)),
    );

    let nodes = vec![generate("slow", "take your time"), preview("after")];
    let edges = vec![edge("e1", "slow", "after")];

    let mut handle = session.start_run(nodes, edges).unwrap();

    // Wait for the slow node to start, then cancel
    let mut events = Vec::new();
    while let Some(event) = handle.events.recv().await {
        let stop = matches!(&event, ExecutionEvent::NodeRunning { node_id } if node_id == "slow");
        events.push(event);
        if stop {
            assert!(session.cancel_run());
        }
    }
    let state = handle.wait().await;

    assert_eq!(state.status, RunStatus::Cancelled);

    // Exactly one terminal run event, and it is not an error
    assert!(matches!(events.last().unwrap(), ExecutionEvent::RunCancelled { .. }));
    assert!(!events.iter().any(|e| matches!(e, ExecutionEvent::NodeError { .. })));

    // Remaining nodes keep the state they had
    let states = session.node_states();
    assert_eq!(states["after"], NodeRunState::Idle);
    assert_eq!(states["slow"], NodeRunState::Running);
}

#[tokio::test]
async fn test_cancel_between_nodes_skips_the_rest() {
    let session = GraphSession::new(MockBackend::unused());

    let nodes = vec![command("first", "echo 1"), command("second", "sleep 30")];
    let edges = vec![edge("e1", "first", "second")];

    let mut handle = session.start_run(nodes, edges).unwrap();

    let mut events = Vec::new();
    while let Some(event) = handle.events.recv().await {
        let stop =
            matches!(&event, ExecutionEvent::NodeCompleted { node_id, .. } if node_id == "first");
        events.push(event);
        if stop {
            session.cancel_run();
        }
    }
    let state = handle.wait().await;

    assert_eq!(state.status, RunStatus::Cancelled);

    let states = session.node_states();
    assert!(matches!(&states["first"], NodeRunState::Completed { .. }));
}

#[tokio::test]
async fn test_cancel_after_finish_is_a_noop() {
    let session = GraphSession::new(MockBackend::unused());

    let (events, state) = run_to_end(&session, vec![command("quick", "true")], vec![]).await;
    assert_eq!(state.status, RunStatus::Finished);

    // No run active anymore; cancelling produces nothing
    assert!(!session.cancel_run());
    assert!(!session.is_active());
    assert!(matches!(events.last().unwrap(), ExecutionEvent::RunFinished { .. }));
}

#[tokio::test]
async fn test_new_run_starts_after_cancellation() {
    let session = GraphSession::new(
        MockBackend::new(vec!["x".to_string()]).with_delay(Duration::from_secs(30)),
    );

    let handle = session.start_run(vec![generate("slow", "p")], vec![]).unwrap();
    session.cancel_run();
    let state = handle.wait().await;
    assert_eq!(state.status, RunStatus::Cancelled);

    // The active-run token was cleaned up; a fresh run may start
    let (_, state) = run_to_end(&session, vec![command("next", "true")], vec![]).await;
    assert_eq!(state.status, RunStatus::Finished);
}

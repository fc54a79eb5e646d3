//! Test: fail-fast propagation - downstream nodes never start

use crate::helpers::*;
use nodeflow::core::{NodeRunState, RunStatus};
use nodeflow::engine::{ExecutionEvent, GraphSession};

#[tokio::test]
async fn test_failed_node_stops_the_run() {
    let session = GraphSession::new(MockBackend::unused());

    let nodes = vec![
        command("ok", "echo fine"),
        command("broken", "echo boom >&2; exit 7"),
        preview("after"),
    ];
    let edges = vec![
        edge("e1", "ok", "broken"),
        edge("e2", "broken", "after"),
    ];

    let (events, state) = run_to_end(&session, nodes, edges).await;

    assert_eq!(state.status, RunStatus::Failed);
    assert_eq!(running_order(&events), vec!["ok", "broken"]);

    // Error event carries exit code and stderr
    let error = events.iter().find_map(|e| match e {
        ExecutionEvent::NodeError { node_id, message } if node_id == "broken" => {
            Some(message.clone())
        }
        _ => None,
    });
    let error = error.unwrap();
    assert!(error.contains("code 7"), "unexpected message: {}", error);
    assert!(error.contains("boom"), "unexpected message: {}", error);

    // A run-level failure closes the stream; no event for the downstream node
    assert!(matches!(events.last().unwrap(), ExecutionEvent::RunFailed { .. }));

    // Completed results are retained, downstream stays Idle
    let states = session.node_states();
    assert!(matches!(&states["ok"], NodeRunState::Completed { .. }));
    assert!(matches!(&states["broken"], NodeRunState::Error { .. }));
    assert_eq!(states["after"], NodeRunState::Idle);
}

#[tokio::test]
async fn test_independent_roots_before_a_failure_keep_their_results() {
    let session = GraphSession::new(MockBackend::unused());

    // x, y, z all feed w; y fails. x runs before the failure is observed,
    // w must never start.
    let nodes = vec![
        command("x", "echo x-out"),
        command("y", "exit 1"),
        command("z", "echo z-out"),
        preview("w"),
    ];
    let edges = vec![
        edge("e1", "x", "w"),
        edge("e2", "y", "w"),
        edge("e3", "z", "w"),
    ];

    let (events, state) = run_to_end(&session, nodes, edges).await;

    assert_eq!(state.status, RunStatus::Failed);
    assert_eq!(running_order(&events), vec!["x", "y"]);

    let states = session.node_states();
    assert!(matches!(&states["x"], NodeRunState::Completed { .. }));
    assert!(matches!(&states["y"], NodeRunState::Error { .. }));
    assert_eq!(states["z"], NodeRunState::Idle);
    assert_eq!(states["w"], NodeRunState::Idle);
}

#[tokio::test]
async fn test_generation_failure_is_a_node_error() {
    // Backend with no canned responses fails the generate call
    let session = GraphSession::new(MockBackend::new(vec![]));

    let (events, state) = run_to_end(
        &session,
        vec![generate("gen", "anything")],
        vec![],
    )
    .await;

    assert_eq!(state.status, RunStatus::Failed);
    assert!(events.iter().any(|e| matches!(
        e,
        ExecutionEvent::NodeError { node_id, message }
            if node_id == "gen" && message.contains("generation failed")
    )));
}

#[tokio::test]
async fn test_session_is_reusable_after_a_failed_run() {
    let session = GraphSession::new(MockBackend::unused());

    let (_, state) = run_to_end(&session, vec![command("bad", "exit 1")], vec![]).await;
    assert_eq!(state.status, RunStatus::Failed);

    let (_, state) = run_to_end(&session, vec![command("good", "true")], vec![]).await;
    assert_eq!(state.status, RunStatus::Finished);
}

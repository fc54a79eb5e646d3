//! Test: at most one run is active per session

use crate::helpers::*;
use nodeflow::core::RunStatus;
use nodeflow::engine::{GraphSession, StartError};
use std::time::Duration;

#[tokio::test]
async fn test_second_start_is_rejected_while_active() {
    let session = GraphSession::new(
        MockBackend::new(vec!["x".to_string()]).with_delay(Duration::from_secs(30)),
    );

    let handle = session.start_run(vec![generate("slow", "p")], vec![]).unwrap();
    assert!(session.is_active());

    // Starting again does not affect the in-progress run
    let second = session.start_run(vec![command("other", "true")], vec![]);
    assert!(matches!(second, Err(StartError::RunAlreadyActive)));
    assert!(session.is_active());

    session.cancel_run();
    let state = handle.wait().await;
    assert_eq!(state.status, RunStatus::Cancelled);
}

#[tokio::test]
async fn test_slot_frees_after_the_run_ends() {
    let session = GraphSession::new(MockBackend::unused());

    let (_, state) = run_to_end(&session, vec![command("a", "true")], vec![]).await;
    assert_eq!(state.status, RunStatus::Finished);
    assert!(!session.is_active());

    let (_, state) = run_to_end(&session, vec![command("b", "true")], vec![]).await;
    assert_eq!(state.status, RunStatus::Finished);
}

#[tokio::test]
async fn test_rejected_start_leaves_prior_states_alone() {
    let session = GraphSession::new(
        MockBackend::new(vec!["x".to_string()]).with_delay(Duration::from_secs(30)),
    );

    let handle = session.start_run(vec![generate("slow", "p")], vec![]).unwrap();

    // The rejected start must not reset the active run's state map
    let _ = session.start_run(vec![command("other", "true")], vec![]);
    assert!(session.node_states().contains_key("slow"));
    assert!(!session.node_states().contains_key("other"));

    session.cancel_run();
    handle.wait().await;
}

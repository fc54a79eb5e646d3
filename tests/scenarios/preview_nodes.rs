//! Test: static input and preview pass-through behavior

use crate::helpers::*;
use nodeflow::core::RunStatus;
use nodeflow::engine::GraphSession;

#[tokio::test]
async fn test_preview_joins_upstream_in_edge_order() {
    let session = GraphSession::new(MockBackend::unused());

    let nodes = vec![
        static_input("second", "world"),
        static_input("first", "hello"),
        preview("view"),
    ];
    // Edge order, not node order, decides the join order
    let edges = vec![
        edge("e1", "first", "view"),
        edge("e2", "second", "view"),
    ];

    let (events, state) = run_to_end(&session, nodes, edges).await;

    assert_eq!(state.status, RunStatus::Finished);
    assert_eq!(completed_output(&events, "view").unwrap(), "hello\nworld");
}

#[tokio::test]
async fn test_preview_without_upstream_is_empty() {
    let session = GraphSession::new(MockBackend::unused());

    let (events, state) = run_to_end(&session, vec![preview("lone")], vec![]).await;

    assert_eq!(state.status, RunStatus::Finished);
    assert_eq!(completed_output(&events, "lone").unwrap(), "");
}

#[tokio::test]
async fn test_empty_static_content_passes_through() {
    let session = GraphSession::new(MockBackend::unused());

    let nodes = vec![static_input("blank", ""), preview("view")];
    let edges = vec![edge("e1", "blank", "view")];

    let (events, state) = run_to_end(&session, nodes, edges).await;

    assert_eq!(state.status, RunStatus::Finished);
    assert_eq!(completed_output(&events, "blank").unwrap(), "");
    assert_eq!(completed_output(&events, "view").unwrap(), "");
}

#[tokio::test]
async fn test_command_sees_multiple_upstream_outputs() {
    let session = GraphSession::new(MockBackend::unused());

    let nodes = vec![
        static_input("greeting", "hi"),
        static_input("name", "graph"),
        command("join", "echo '{{ greeting }} {{ name }}'"),
    ];
    let edges = vec![
        edge("e1", "greeting", "join"),
        edge("e2", "name", "join"),
    ];

    let (events, state) = run_to_end(&session, nodes, edges).await;

    assert_eq!(state.status, RunStatus::Finished);
    assert_eq!(completed_output(&events, "join").unwrap().trim(), "hi graph");
}

//! nodeflow - a graph-based runner for command, prompt, and text nodes

pub mod cli;
pub mod core;
pub mod engine;
pub mod generate;

// Re-export commonly used types
pub use crate::core::{
    sequence, validate_nodes, CycleError, Edge, ExecutionPlan, Graph, GraphDocument, GraphError,
    Node, NodeIssue, NodeKind, NodeRunState, RunContext, RunState, RunStatus,
};
pub use crate::engine::{
    ExecutionError, ExecutionEvent, GraphSession, NodeRunner, RunHandle, StartError,
};
pub use crate::generate::{BackendConfig, BackendError, GenerateBackend, SubprocessBackend};

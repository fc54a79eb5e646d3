//! Run and node state models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Terminal-aware status of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Run is in progress
    Running,
    /// Every node in the order completed
    Finished,
    /// A node failed; downstream nodes were never started
    Failed,
    /// The run was cancelled before finishing
    Cancelled,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

/// Per-node, per-run state.
///
/// Transitions are forward-only: `Idle -> Running -> {Completed, Error}`.
/// A cancelled run leaves nodes wherever they were; the map is reset to
/// `Idle` when the next run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRunState {
    /// Not yet reached in this run
    Idle,
    /// Currently executing
    Running,
    /// Finished with a result
    Completed { output: String },
    /// Failed; the message doubles as the node's displayed result
    Error { message: String },
}

impl NodeRunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, NodeRunState::Completed { .. } | NodeRunState::Error { .. })
    }

    /// The node's last produced output or error message, if any
    pub fn result(&self) -> Option<&str> {
        match self {
            NodeRunState::Completed { output } => Some(output),
            NodeRunState::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Summary state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    /// Unique run id
    pub run_id: Uuid,

    /// Current status
    pub status: RunStatus,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run reached a terminal status
    pub completed_at: Option<DateTime<Utc>>,
}

impl RunState {
    /// Create state for a run starting now
    pub fn start(run_id: Uuid) -> Self {
        Self {
            run_id,
            status: RunStatus::Running,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Move to a terminal status, stamping the completion time
    pub fn finish(&mut self, status: RunStatus) {
        debug_assert!(status.is_terminal());
        self.status = status;
        self.completed_at = Some(Utc::now());
    }
}

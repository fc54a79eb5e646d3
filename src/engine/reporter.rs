//! Status reporter - ordered delivery of run and node events

use crate::core::state::RunStatus;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Events emitted while a graph runs.
///
/// Node events arrive in execution order; a node's `NodeRunning` always
/// precedes its terminal event, and exactly one run-level terminal event
/// closes the stream.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted {
        run_id: Uuid,
    },
    NodeRunning {
        node_id: String,
    },
    NodeCompleted {
        node_id: String,
        output: String,
    },
    NodeError {
        node_id: String,
        message: String,
    },
    RunFinished {
        run_id: Uuid,
    },
    RunFailed {
        run_id: Uuid,
    },
    RunCancelled {
        run_id: Uuid,
    },
}

impl ExecutionEvent {
    /// The terminal run event for a given status, if the status is terminal
    pub fn for_terminal_status(run_id: Uuid, status: RunStatus) -> Option<Self> {
        match status {
            RunStatus::Finished => Some(ExecutionEvent::RunFinished { run_id }),
            RunStatus::Failed => Some(ExecutionEvent::RunFailed { run_id }),
            RunStatus::Cancelled => Some(ExecutionEvent::RunCancelled { run_id }),
            RunStatus::Running => None,
        }
    }
}

/// Thin event sink between the orchestrator and the caller.
///
/// Forwards events in emission order over an unbounded channel; sends after
/// the caller has dropped the receiver are ignored, since delivery is only
/// guaranteed within a run that is still being observed.
pub struct StatusReporter {
    sender: mpsc::UnboundedSender<ExecutionEvent>,
}

impl StatusReporter {
    /// Create a reporter and the receiving end of its event stream
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ExecutionEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn emit(&self, event: ExecutionEvent) {
        let _ = self.sender.send(event);
    }

    pub fn node_running(&self, node_id: &str) {
        self.emit(ExecutionEvent::NodeRunning {
            node_id: node_id.to_string(),
        });
    }

    pub fn node_completed(&self, node_id: &str, output: &str) {
        self.emit(ExecutionEvent::NodeCompleted {
            node_id: node_id.to_string(),
            output: output.to_string(),
        });
    }

    pub fn node_error(&self, node_id: &str, message: &str) {
        self.emit(ExecutionEvent::NodeError {
            node_id: node_id.to_string(),
            message: message.to_string(),
        });
    }
}

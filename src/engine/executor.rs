//! Node executors - one unit of work per node kind

use crate::core::node::{Node, NodeKind};
use crate::generate::{BackendError, GenerateBackend};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// A single node's work failed during a run
#[derive(Debug, Clone, Error)]
pub enum ExecutionError {
    #[error("command exited with code {code}: {stderr}")]
    CommandFailed { code: i32, stderr: String },

    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// The run was cancelled while this node was in flight. Never surfaced
    /// as a node error event; the orchestrator maps it to the cancelled
    /// run phase.
    #[error("node interrupted")]
    Interrupted,
}

/// Executes individual nodes, dispatching on their kind
pub struct NodeRunner<B> {
    backend: B,
    timeout_secs: u64,
}

impl<B: GenerateBackend> NodeRunner<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            timeout_secs: 300,
        }
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Execute one node with the outputs of its direct predecessors.
    ///
    /// `inputs` pairs predecessor id with that predecessor's output, in
    /// edge order. The cancel token is observed at every suspension point
    /// so in-flight work can be interrupted.
    pub async fn execute(
        &self,
        node: &Node,
        inputs: &[(&str, &str)],
        cancel: &CancellationToken,
    ) -> Result<String, ExecutionError> {
        info!("executing node {} ({})", node.id, node.kind.name());

        match &node.kind {
            NodeKind::Command { command } => {
                let command = substitute(command, inputs);
                debug!("node {} command: {}", node.id, command);
                self.run_command(&node.id, &command, cancel).await
            }
            NodeKind::Generate { prompt } => {
                let prompt = substitute(prompt, inputs);
                debug!("node {} prompt: {}", node.id, prompt);
                self.backend
                    .generate(&prompt, cancel)
                    .await
                    .map_err(|e| match e {
                        BackendError::Interrupted => ExecutionError::Interrupted,
                        other => ExecutionError::GenerationFailed(other.to_string()),
                    })
            }
            NodeKind::StaticInput { content } => Ok(content.clone()),
            NodeKind::Preview => {
                // Pass-through: relabel upstream content as this node's result
                let joined = inputs
                    .iter()
                    .map(|(_, output)| *output)
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(joined)
            }
        }
    }

    /// Run a shell command, capturing stdout as the node result
    async fn run_command(
        &self,
        node_id: &str,
        command: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ExecutionError> {
        let timeout_duration = Duration::from_secs(self.timeout_secs);
        let output_future = Command::new("sh")
            .arg("-c")
            .arg(command)
            .kill_on_drop(true)
            .output();

        // Dropping the output future on cancellation kills the child
        let result = tokio::select! {
            _ = cancel.cancelled() => {
                info!("node {} interrupted while running command", node_id);
                return Err(ExecutionError::Interrupted);
            }
            result = timeout(timeout_duration, output_future) => result,
        };

        let output = result
            .map_err(|_| ExecutionError::CommandFailed {
                code: -1,
                stderr: format!("timeout after {} seconds", self.timeout_secs),
            })?
            .map_err(|e| ExecutionError::CommandFailed {
                code: -1,
                stderr: format!("failed to spawn: {}", e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            warn!("node {} command exited with code {}: {}", node_id, code, stderr);
            return Err(ExecutionError::CommandFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Replace `{{ id }}` placeholders naming a direct predecessor with that
/// predecessor's output. Placeholders that do not name a predecessor are
/// left untouched.
pub fn substitute(template: &str, inputs: &[(&str, &str)]) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let re = PLACEHOLDER
        .get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.-]+)\s*\}\}").unwrap_or_else(|_| unreachable!()));

    re.replace_all(template, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match inputs.iter().find(|(id, _)| *id == name) {
            Some((_, output)) => (*output).to_string(),
            None => caps[0].to_string(),
        }
    })
    .into_owned()
}

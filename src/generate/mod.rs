//! Generation backend for prompt nodes

pub mod subprocess;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub use subprocess::SubprocessBackend;

/// Error types for generation backends
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to spawn backend: {0}")]
    Spawn(String),

    #[error("backend exited with code {code}: {stderr}")]
    Exit { code: i32, stderr: String },

    #[error("timeout after {0} seconds")]
    Timeout(u64),

    #[error("backend produced invalid output: {0}")]
    InvalidOutput(String),

    /// The run was cancelled while generation was in flight. Mapped to the
    /// cancelled run phase by the orchestrator, never to a node error.
    #[error("generation interrupted")]
    Interrupted,
}

/// Trait for generation execution - allows for different backends
#[async_trait]
pub trait GenerateBackend: Send + Sync {
    /// Send a prompt and return the generated text. Implementations must
    /// observe `cancel` so in-flight work can be aborted.
    async fn generate(&self, prompt: &str, cancel: &CancellationToken)
        -> Result<String, BackendError>;
}

/// Configuration for the subprocess generation backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Program to invoke (e.g. "llm", "/usr/local/bin/llm")
    pub program: String,

    /// Fixed arguments placed before the prompt
    pub args: Vec<String>,

    /// Timeout for one generation call in seconds
    pub timeout_secs: u64,
}

impl BackendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: String) -> Self {
        self.program = program;
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: "llm".to_string(),
            args: Vec::new(),
            timeout_secs: 300,
        }
    }
}

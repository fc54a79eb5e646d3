//! Subprocess generation backend - shells out to a model CLI

use crate::generate::{BackendConfig, BackendError, GenerateBackend};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Backend that invokes a model CLI as a subprocess, passing the prompt as
/// the final argument and reading the generated text from stdout.
#[derive(Debug, Clone)]
pub struct SubprocessBackend {
    config: BackendConfig,
}

impl SubprocessBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    #[cfg(test)]
    pub fn program(&self) -> &str {
        &self.config.program
    }
}

#[async_trait]
impl GenerateBackend for SubprocessBackend {
    async fn generate(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, BackendError> {
        debug!(
            "spawning {} with prompt length {}",
            self.config.program,
            prompt.len()
        );

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let output_future = Command::new(&self.config.program)
            .args(&self.config.args)
            .arg(prompt)
            .kill_on_drop(true)
            .output();

        // Dropping the output future on cancellation kills the child
        let result = tokio::select! {
            _ = cancel.cancelled() => return Err(BackendError::Interrupted),
            result = timeout(timeout_duration, output_future) => result,
        };

        let output = result
            .map_err(|_| BackendError::Timeout(self.config.timeout_secs))?
            .map_err(|e| BackendError::Spawn(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            warn!("{} exited with code {}: {}", self.config.program, code, stderr);
            return Err(BackendError::Exit { code, stderr });
        }

        let content = String::from_utf8(output.stdout)
            .map_err(|e| BackendError::InvalidOutput(e.to_string()))?;

        debug!("{} returned {} bytes", self.config.program, content.len());

        Ok(content)
    }
}

//! CLI output formatting

use crate::core::state::RunStatus;
use crate::engine::ExecutionEvent;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");

/// Create a progress bar over the node count
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Format a run status for display
pub fn format_status(status: RunStatus) -> String {
    match status {
        RunStatus::Running => style("RUNNING").yellow().to_string(),
        RunStatus::Finished => style("FINISHED").green().to_string(),
        RunStatus::Failed => style("FAILED").red().to_string(),
        RunStatus::Cancelled => style("CANCELLED").yellow().to_string(),
    }
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::RunStarted { run_id } => format!(
            "{} Starting run {}",
            ROCKET,
            style(&run_id.to_string()[..8]).dim()
        ),
        ExecutionEvent::NodeRunning { node_id } => {
            format!("{} {}", SPINNER, style(node_id).cyan())
        }
        ExecutionEvent::NodeCompleted { node_id, .. } => {
            format!("{} {}", CHECK, style(node_id).green())
        }
        ExecutionEvent::NodeError { node_id, message } => {
            format!("{} {}: {}", CROSS, style(node_id).red(), style(message).dim())
        }
        ExecutionEvent::RunFinished { run_id } => format!(
            "{} Run ({}) {}",
            INFO,
            style(&run_id.to_string()[..8]).dim(),
            style("finished").green()
        ),
        ExecutionEvent::RunFailed { run_id } => format!(
            "{} Run ({}) {}",
            INFO,
            style(&run_id.to_string()[..8]).dim(),
            style("failed").red()
        ),
        ExecutionEvent::RunCancelled { run_id } => format!(
            "{} Run ({}) {}",
            WARN,
            style(&run_id.to_string()[..8]).dim(),
            style("cancelled").yellow()
        ),
    }
}

/// Format node output with truncation
pub fn format_output(output: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = output.lines().collect();

    if lines.len() <= max_lines {
        output.to_string()
    } else {
        let truncated = lines[..max_lines].join("\n");
        format!(
            "{}\n{}... ({} more lines)",
            truncated,
            style("[truncated]").dim(),
            lines.len() - max_lines
        )
    }
}

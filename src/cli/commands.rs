//! CLI command definitions

use clap::Args;

/// Execute a graph file
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to the graph file (JSON or YAML)
    #[arg(short, long)]
    pub file: String,

    /// Program to use as the generation backend
    #[arg(long, default_value = "llm")]
    pub backend: String,

    /// Extra arguments passed to the backend before the prompt
    #[arg(long)]
    pub backend_arg: Vec<String>,

    /// Per-node timeout in seconds
    #[arg(long, default_value_t = 300)]
    pub timeout_secs: u64,
}

/// Validate a graph file and print its execution plan
#[derive(Debug, Args, Clone)]
pub struct CheckCommand {
    /// Path to the graph file (JSON or YAML)
    #[arg(short, long)]
    pub file: String,

    /// Output the normalized document as JSON
    #[arg(long)]
    pub json: bool,
}

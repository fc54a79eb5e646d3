mod cli;
mod core;
mod engine;
mod generate;

use anyhow::{Context, Result};
use cli::commands::{CheckCommand, RunCommand};
use cli::output::*;
use cli::{Cli, Command};
use crate::core::{sequence, validate_nodes, Graph, GraphDocument, RunStatus};
use engine::{ExecutionEvent, GraphSession, NodeRunner, StartError};
use generate::{BackendConfig, SubprocessBackend};
use std::path::Path;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Run(cmd) => run_graph(cmd).await?,
        Command::Check(cmd) => check_graph(cmd)?,
    }

    Ok(())
}

async fn run_graph(cmd: &RunCommand) -> Result<()> {
    let doc = GraphDocument::from_path(Path::new(&cmd.file))
        .context("Failed to load graph file")?;

    println!(
        "{} Loaded graph: {} node(s), {} edge(s)",
        INFO,
        style(doc.nodes.len()).cyan(),
        style(doc.edges.len()).cyan()
    );

    let backend = SubprocessBackend::new(
        BackendConfig::new()
            .with_program(cmd.backend.clone())
            .with_args(cmd.backend_arg.clone())
            .with_timeout_secs(cmd.timeout_secs),
    );
    let runner = NodeRunner::new(backend).with_timeout_secs(cmd.timeout_secs);
    let session = Arc::new(GraphSession::with_runner(runner));

    let total = doc.nodes.len();
    let mut handle = match session.start_run(doc.nodes, doc.edges) {
        Ok(handle) => handle,
        Err(e) => {
            print_start_error(&e);
            std::process::exit(1);
        }
    };

    // Ctrl-C requests cancellation of the active run
    {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                session.cancel_run();
            }
        });
    }

    let progress = create_progress_bar(total);
    while let Some(event) = handle.events.recv().await {
        progress.println(format_execution_event(&event));
        match &event {
            ExecutionEvent::NodeCompleted { output, .. } => {
                if !output.trim().is_empty() {
                    progress.println(format_output(output.trim_end(), 5));
                }
                progress.inc(1);
            }
            ExecutionEvent::NodeError { .. } => progress.inc(1),
            _ => {}
        }
    }
    progress.finish_and_clear();

    let state = handle.wait().await;
    println!("\n{} Run {}", INFO, format_status(state.status));

    if state.status == RunStatus::Failed {
        std::process::exit(1);
    }

    Ok(())
}

fn check_graph(cmd: &CheckCommand) -> Result<()> {
    println!("{} Checking graph...", INFO);

    let doc = GraphDocument::from_path(Path::new(&cmd.file))
        .context("Failed to load graph file")?;

    let graph = match Graph::build(doc.nodes.clone(), doc.edges.clone()) {
        Ok(graph) => graph,
        Err(e) => {
            println!("{} Invalid graph: {}", CROSS, style(e).red());
            std::process::exit(1);
        }
    };

    let plan = match sequence(&graph) {
        Ok(plan) => plan,
        Err(e) => {
            println!("{} {}", CROSS, style(e).red());
            std::process::exit(1);
        }
    };

    let issues = validate_nodes(graph.nodes());
    if !issues.is_empty() {
        println!("{} Validation failed:", CROSS);
        for issue in &issues {
            println!("  {}: {}", style(&issue.node_id).red(), issue.message);
        }
        std::process::exit(1);
    }

    println!("{} Graph is valid!", CHECK);
    println!("  Execution order:");
    for (i, node_id) in plan.order.iter().enumerate() {
        println!("    {}. {}", i + 1, style(node_id).cyan());
    }

    if !graph.edges().is_empty() {
        println!("  Edge sequence:");
        let mut edges: Vec<_> = graph.edges().iter().collect();
        edges.sort_by_key(|e| plan.edge_sequence[&e.id]);
        for edge in edges {
            println!(
                "    {}. {} ({} → {})",
                plan.edge_sequence[&edge.id],
                style(&edge.id).cyan(),
                edge.source,
                edge.target
            );
        }
    }

    if cmd.json {
        println!("\n{}", doc.to_json()?);
    }

    Ok(())
}

fn print_start_error(error: &StartError) {
    match error {
        StartError::ValidationFailed(issues) => {
            println!("{} Validation failed:", CROSS);
            for issue in issues {
                println!("  {}: {}", style(&issue.node_id).red(), issue.message);
            }
        }
        other => {
            println!("{} {}", CROSS, style(other).red());
        }
    }
}

//! Execution orchestrator - drives one run at a time over a graph session

use crate::core::context::RunContext;
use crate::core::graph::{Graph, GraphError};
use crate::core::node::{validate_nodes, Edge, Node, NodeIssue};
use crate::core::sequence::{sequence, CycleError, ExecutionPlan};
use crate::core::state::{NodeRunState, RunState, RunStatus};
use crate::engine::executor::{ExecutionError, NodeRunner};
use crate::engine::reporter::{ExecutionEvent, StatusReporter};
use crate::generate::GenerateBackend;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Reasons a run cannot start. All surfaced synchronously, before any
/// event is emitted and before any node leaves `Idle`.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphError),

    #[error("cyclic graph: {0}")]
    CyclicGraph(#[from] CycleError),

    #[error("{} node(s) failed validation", .0.len())]
    ValidationFailed(Vec<NodeIssue>),

    #[error("a run is already active for this session")]
    RunAlreadyActive,
}

/// The cancellation handle for the run in flight
struct ActiveRun {
    run_id: Uuid,
    cancel: CancellationToken,
}

/// A started run: its id, the ordered event stream, and the task handle
pub struct RunHandle {
    pub run_id: Uuid,
    pub events: mpsc::UnboundedReceiver<ExecutionEvent>,
    task: JoinHandle<RunState>,
}

impl RunHandle {
    /// Wait for the run task to finish and return its final state
    pub async fn wait(self) -> RunState {
        match self.task.await {
            Ok(state) => state,
            Err(e) => {
                error!("run task panicked: {}", e);
                let mut state = RunState::start(self.run_id);
                state.finish(RunStatus::Failed);
                state
            }
        }
    }
}

/// Owns one graph session: at most one run is active at a time, and the
/// node states of the most recent run are retained until the next start.
pub struct GraphSession<B> {
    runner: Arc<NodeRunner<B>>,
    active: Arc<Mutex<Option<ActiveRun>>>,
    states: Arc<Mutex<HashMap<String, NodeRunState>>>,
}

impl<B: GenerateBackend + 'static> GraphSession<B> {
    pub fn new(backend: B) -> Self {
        Self::with_runner(NodeRunner::new(backend))
    }

    pub fn with_runner(runner: NodeRunner<B>) -> Self {
        Self {
            runner: Arc::new(runner),
            active: Arc::new(Mutex::new(None)),
            states: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Start executing a graph snapshot.
    ///
    /// Validates structure, acyclicity, and node fields up front; any
    /// defect fails here with zero events emitted. While a run is active,
    /// further starts are rejected with `RunAlreadyActive` — the session
    /// never cancels an in-flight run implicitly.
    pub fn start_run(&self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<RunHandle, StartError> {
        let graph = Graph::build(nodes, edges)?;
        let plan = sequence(&graph)?;

        let issues = validate_nodes(graph.nodes());
        if !issues.is_empty() {
            warn!("run rejected: {} node(s) failed validation", issues.len());
            return Err(StartError::ValidationFailed(issues));
        }

        let run_id = Uuid::new_v4();
        let cancel = CancellationToken::new();
        {
            let mut slot = lock(&self.active);
            if slot.is_some() {
                return Err(StartError::RunAlreadyActive);
            }
            *slot = Some(ActiveRun {
                run_id,
                cancel: cancel.clone(),
            });
        }

        // Fresh state map for this run's snapshot
        {
            let mut states = lock(&self.states);
            states.clear();
            for node in graph.nodes() {
                states.insert(node.id.clone(), NodeRunState::Idle);
            }
        }

        let (reporter, events) = StatusReporter::channel();
        let runner = Arc::clone(&self.runner);
        let states = Arc::clone(&self.states);
        let active = Arc::clone(&self.active);

        info!("starting run {} over {} node(s)", run_id, graph.nodes().len());
        let task = tokio::spawn(async move {
            let state = run_task(run_id, graph, plan, runner, &states, &cancel, &reporter).await;

            // Free the single-flight slot so a new run may start
            let mut slot = lock(&active);
            if slot.as_ref().map(|a| a.run_id) == Some(run_id) {
                *slot = None;
            }

            state
        });

        Ok(RunHandle {
            run_id,
            events,
            task,
        })
    }

    /// Request cancellation of the active run, if any. Returns whether a
    /// run was active; calling this after a run finished is a no-op and
    /// produces no events.
    pub fn cancel_run(&self) -> bool {
        let slot = lock(&self.active);
        match slot.as_ref() {
            Some(run) => {
                info!("cancelling run {}", run.run_id);
                run.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Whether a run is currently active
    pub fn is_active(&self) -> bool {
        lock(&self.active).is_some()
    }

    /// Node states from the current or most recent run
    pub fn node_states(&self) -> HashMap<String, NodeRunState> {
        lock(&self.states).clone()
    }
}

/// The sequential run loop: one node at a time, in plan order, fail-fast.
async fn run_task<B: GenerateBackend>(
    run_id: Uuid,
    graph: Graph,
    plan: ExecutionPlan,
    runner: Arc<NodeRunner<B>>,
    states: &Mutex<HashMap<String, NodeRunState>>,
    cancel: &CancellationToken,
    reporter: &StatusReporter,
) -> RunState {
    let mut run_state = RunState::start(run_id);
    reporter.emit(ExecutionEvent::RunStarted { run_id });

    let mut ctx = RunContext::new();
    let mut status = RunStatus::Finished;

    for node_id in &plan.order {
        if cancel.is_cancelled() {
            // Remaining nodes keep whatever state they had
            info!("run {} cancelled before node {}", run_id, node_id);
            status = RunStatus::Cancelled;
            break;
        }

        let node = match graph.node(node_id) {
            Some(node) => node,
            // The plan is derived from this graph, so every id resolves
            None => continue,
        };

        set_state(states, node_id, NodeRunState::Running);
        reporter.node_running(node_id);

        let result = {
            let predecessors = graph.predecessors(node_id);
            let inputs = ctx.inputs_for(&predecessors);
            runner.execute(node, &inputs, cancel).await
        };

        match result {
            Ok(output) => {
                set_state(states, node_id, NodeRunState::Completed { output: output.clone() });
                reporter.node_completed(node_id, &output);
                ctx.set_output(node_id, output);
            }
            Err(ExecutionError::Interrupted) => {
                info!("run {} cancelled during node {}", run_id, node_id);
                status = RunStatus::Cancelled;
                break;
            }
            Err(e) => {
                // Fail fast: downstream nodes are never started
                let message = e.to_string();
                error!("node {} failed: {}", node_id, message);
                set_state(states, node_id, NodeRunState::Error { message: message.clone() });
                reporter.node_error(node_id, &message);
                status = RunStatus::Failed;
                break;
            }
        }
    }

    run_state.finish(status);
    if let Some(event) = ExecutionEvent::for_terminal_status(run_id, status) {
        reporter.emit(event);
    }
    info!("run {} ended: {:?}", run_id, status);

    run_state
}

fn set_state(states: &Mutex<HashMap<String, NodeRunState>>, node_id: &str, state: NodeRunState) {
    lock(states).insert(node_id.to_string(), state);
}

/// Lock a mutex, recovering the data if a holder panicked
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

//! Topological sequencer - deterministic execution order and edge numbering

use crate::core::graph::Graph;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

/// The graph contains a dependency cycle
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("dependency cycle involving node: {node_id}")]
pub struct CycleError {
    /// One node on the cycle (lowest node-list index among those stuck)
    pub node_id: String,
}

/// The computed plan for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Node ids such that every edge source precedes its target
    pub order: Vec<String>,

    /// Display-only numbering of edges, consistent with `order`
    pub edge_sequence: HashMap<String, u32>,
}

/// Compute a deterministic execution order using Kahn's algorithm.
///
/// The ready queue is seeded with all in-degree-0 nodes, ordered by the
/// position of their first outgoing edge in the original edge list; roots
/// with no outgoing edges sort after those, in node-list order. This keeps
/// independent branches in the order the author wired them. Nodes becoming
/// ready later are enqueued at the back as their last dependency completes.
pub fn sequence(graph: &Graph) -> Result<ExecutionPlan, CycleError> {
    let nodes = graph.nodes();
    let edges = graph.edges();
    let mut in_degree = graph.in_degrees();

    let mut roots: Vec<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    roots.sort_by_key(|&i| seed_key(graph, i, edges.len()));

    let mut queue: VecDeque<usize> = roots.into_iter().collect();
    let mut order = Vec::with_capacity(nodes.len());

    while let Some(current) = queue.pop_front() {
        order.push(current);

        for &e in graph.outgoing(current) {
            let target = graph
                .node_index(&edges[e].target)
                .unwrap_or_else(|| unreachable!("edges are validated against node ids"));
            in_degree[target] -= 1;
            if in_degree[target] == 0 {
                queue.push_back(target);
            }
        }
    }

    if order.len() != nodes.len() {
        // Every remaining node sits on or behind a cycle; name the first one
        let stuck = (0..nodes.len())
            .find(|&i| in_degree[i] > 0)
            .unwrap_or_else(|| unreachable!("short order implies a positive in-degree"));
        return Err(CycleError {
            node_id: nodes[stuck].id.clone(),
        });
    }

    // Number each node's outgoing edges as the node is visited, starting at 1
    let mut edge_sequence = HashMap::with_capacity(edges.len());
    let mut next = 1u32;
    for &i in &order {
        for &e in graph.outgoing(i) {
            edge_sequence.insert(edges[e].id.clone(), next);
            next += 1;
        }
    }

    Ok(ExecutionPlan {
        order: order.into_iter().map(|i| nodes[i].id.clone()).collect(),
        edge_sequence,
    })
}

/// Sort key for seeding the ready queue: first outgoing edge position, or
/// past the edge list (in node-list order) for nodes with no outgoing edges.
fn seed_key(graph: &Graph, node_index: usize, edge_count: usize) -> usize {
    match graph.outgoing(node_index).first() {
        Some(&e) => e,
        None => edge_count + node_index,
    }
}

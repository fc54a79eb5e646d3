//! Validated graph model - nodes, edges, and derived dependency tables

use crate::core::node::{Edge, Node};
use std::collections::HashMap;
use thiserror::Error;

/// Structural defects found while building a graph
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate node id: {id}")]
    DuplicateNode { id: String },

    #[error("duplicate edge id: {id}")]
    DuplicateEdge { id: String },

    #[error("edge {edge_id} references unknown node: {node_id}")]
    UnknownNode { edge_id: String, node_id: String },
}

/// An immutable, validated snapshot of a node/edge graph.
///
/// Built once per run from the editor's collections; the engine never
/// mutates it, so concurrent editor changes cannot race a run in progress.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,

    /// node id -> position in `nodes`
    index: HashMap<String, usize>,

    /// node index -> outgoing edge indices, in edge-list order
    outgoing: Vec<Vec<usize>>,

    /// node index -> incoming edge indices, in edge-list order
    incoming: Vec<Vec<usize>>,
}

impl Graph {
    /// Validate a candidate node and edge list and build the derived
    /// adjacency tables. Pure; the inputs are moved in and kept as-is.
    pub fn build(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateNode { id: node.id.clone() });
            }
        }

        let mut outgoing = vec![Vec::new(); nodes.len()];
        let mut incoming = vec![Vec::new(); nodes.len()];
        let mut edge_ids = HashMap::with_capacity(edges.len());

        for (e, edge) in edges.iter().enumerate() {
            if edge_ids.insert(edge.id.clone(), e).is_some() {
                return Err(GraphError::DuplicateEdge { id: edge.id.clone() });
            }

            let source = *index.get(&edge.source).ok_or_else(|| GraphError::UnknownNode {
                edge_id: edge.id.clone(),
                node_id: edge.source.clone(),
            })?;
            let target = *index.get(&edge.target).ok_or_else(|| GraphError::UnknownNode {
                edge_id: edge.id.clone(),
                node_id: edge.target.clone(),
            })?;

            outgoing[source].push(e);
            incoming[target].push(e);
        }

        Ok(Graph {
            nodes,
            edges,
            index,
            outgoing,
            incoming,
        })
    }

    /// Nodes in their original author order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Edges in their original author order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    /// Position of a node in the original node list
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Outgoing edges of a node, as indices into `edges()`, in edge-list order
    pub fn outgoing(&self, node_index: usize) -> &[usize] {
        &self.outgoing[node_index]
    }

    /// In-degree of every node, indexed like `nodes()`
    pub fn in_degrees(&self) -> Vec<usize> {
        self.incoming.iter().map(|e| e.len()).collect()
    }

    /// Ids of a node's direct predecessors, in edge-list order
    pub fn predecessors(&self, id: &str) -> Vec<&str> {
        match self.index.get(id) {
            Some(&i) => self.incoming[i]
                .iter()
                .map(|&e| self.edges[e].source.as_str())
                .collect(),
            None => Vec::new(),
        }
    }
}

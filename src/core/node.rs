//! Node and edge domain models

use serde::{Deserialize, Serialize};

/// A single node in a graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier
    pub id: String,

    /// Display label (editor-owned, not used by the engine)
    #[serde(default)]
    pub label: String,

    /// The kind of work this node performs, with its payload
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// The closed set of node kinds.
///
/// Dispatch is exhaustive pattern matching, so adding a kind is a
/// compile-time change everywhere a node is executed or validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeKind {
    /// Runs a shell command and captures its output
    Command { command: String },

    /// Sends a prompt to the generation backend
    Generate { prompt: String },

    /// Yields its literal content verbatim
    StaticInput { content: String },

    /// Pass-through node that relabels upstream output as its own result
    Preview,
}

impl NodeKind {
    /// Short name for logging and display
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Command { .. } => "command",
            NodeKind::Generate { .. } => "generate",
            NodeKind::StaticInput { .. } => "static_input",
            NodeKind::Preview => "preview",
        }
    }
}

/// A directed dependency between two nodes: `target` depends on `source`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge identifier
    pub id: String,

    /// Id of the node this edge leaves
    pub source: String,

    /// Id of the node this edge enters
    pub target: String,
}

/// A node that failed pre-run field validation, with a message suitable
/// for highlighting the node in an editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIssue {
    pub node_id: String,
    pub message: String,
}

/// Check required fields on every node before a run starts.
///
/// Returns one issue per offending node; an empty vec means the set is
/// runnable. No node may execute while any issue exists.
pub fn validate_nodes(nodes: &[Node]) -> Vec<NodeIssue> {
    let mut issues = Vec::new();

    for node in nodes {
        match &node.kind {
            NodeKind::Command { command } if command.trim().is_empty() => {
                issues.push(NodeIssue {
                    node_id: node.id.clone(),
                    message: "Command field is required".to_string(),
                });
            }
            NodeKind::Generate { prompt } if prompt.trim().is_empty() => {
                issues.push(NodeIssue {
                    node_id: node.id.clone(),
                    message: "Prompt field is required".to_string(),
                });
            }
            // Static content may be empty; it passes through verbatim
            _ => {}
        }
    }

    issues
}

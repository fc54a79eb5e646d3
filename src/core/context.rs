//! Run context - outputs produced so far in one run

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Accumulated outputs for a run in progress.
///
/// Owned by the orchestrator; executors only ever see the slice of it that
/// belongs to a node's direct predecessors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunContext {
    /// Outputs from completed nodes (node id -> output)
    outputs: HashMap<String, String>,
}

impl RunContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the output of a completed node
    pub fn set_output(&mut self, node_id: &str, output: String) {
        self.outputs.insert(node_id.to_string(), output);
    }

    /// Output of a completed node, if any
    pub fn output(&self, node_id: &str) -> Option<&str> {
        self.outputs.get(node_id).map(String::as_str)
    }

    /// Collect the outputs of the given predecessor ids, in the order
    /// given, skipping any that have not produced output. This is the
    /// input view a node executor receives.
    pub fn inputs_for<'a>(&'a self, predecessors: &[&str]) -> Vec<(&'a str, &'a str)> {
        predecessors
            .iter()
            .filter_map(|&id| {
                self.outputs
                    .get_key_value(id)
                    .map(|(k, v)| (k.as_str(), v.as_str()))
            })
            .collect()
    }
}

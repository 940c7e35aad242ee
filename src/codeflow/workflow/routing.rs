// SPDX-License-Identifier: MIT

//! Successor resolution after a node completes

use super::types::{Workflow, END};
use serde::{Deserialize, Serialize};

/// How the engine picks the next node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Routing {
    /// A conditional node follows the edge labeled with its outcome,
    /// falling back to its first unlabeled edge. Other nodes take
    /// their first outgoing edge.
    #[default]
    Outcome,
    /// Always take the first outgoing edge, ignoring labels
    FirstEdge,
}

/// Whether traversal stops at this id
pub fn is_terminal(id: &str) -> bool {
    id.is_empty() || id == END
}

/// Id of the node to run after `source`; `END` when no edge applies
pub fn next_node(workflow: &Workflow, source: &str, branch: Option<&str>, routing: Routing) -> String {
    let mut outgoing = workflow.outgoing(source);

    let edge = match (routing, branch) {
        (Routing::Outcome, Some(outcome)) => {
            let edges: Vec<_> = outgoing.collect();
            let chosen = edges
                .iter()
                .find(|e| e.condition.as_deref() == Some(outcome))
                .or_else(|| edges.iter().find(|e| e.condition.is_none()))
                .copied();
            if chosen.is_none() && !edges.is_empty() {
                log::warn!(
                    "No edge from '{}' matches outcome '{}'; ending traversal",
                    source,
                    outcome
                );
            }
            chosen
        }
        _ => outgoing.next(),
    };

    edge.map(|e| e.target.clone())
        .unwrap_or_else(|| END.to_string())
}

// SPDX-License-Identifier: MIT

//! Workflow definition types
//!
//! These are the serialization boundary: definitions come from the
//! authoring surface as JSON or YAML and are read-only to the engine.
//! Node configuration stays an untyped map here and is converted into
//! typed per-node configs when the node executes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Terminal marker used as an edge target
pub const END: &str = "END";

/// Behavior tag of a node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Llm,
    Tool,
    Conditional,
    Human,
    /// Any tag this engine does not know; kept so the error can name it
    Unknown(String),
}

impl From<String> for NodeType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "llm" => NodeType::Llm,
            "tool" => NodeType::Tool,
            "conditional" => NodeType::Conditional,
            "human" => NodeType::Human,
            _ => NodeType::Unknown(s),
        }
    }
}

impl From<NodeType> for String {
    fn from(t: NodeType) -> Self {
        t.to_string()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeType::Llm => write!(f, "llm"),
            NodeType::Tool => write!(f, "tool"),
            NodeType::Conditional => write!(f, "conditional"),
            NodeType::Human => write!(f, "human"),
            NodeType::Unknown(s) => write!(f, "{}", s),
        }
    }
}

/// A node in the workflow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    /// Unique identifier for this node
    pub id: String,
    /// Display name recorded in execution steps
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Type-specific parameters
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            node_type,
            config: Map::new(),
        }
    }

    /// Replace the config with the fields of a JSON object; non-objects are ignored
    pub fn with_config(mut self, config: Value) -> Self {
        if let Value::Object(map) = config {
            self.config = map;
        }
        self
    }
}

/// A directed link from one node to its successor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    /// Outcome label; matched against a conditional node's outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl WorkflowEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            condition: None,
        }
    }

    pub fn when(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }
}

/// A complete workflow definition
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    /// Node id where traversal begins; empty means nothing to run
    #[serde(default)]
    pub entry_point: String,
}

impl Workflow {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_node(mut self, node: WorkflowNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn with_edge(mut self, edge: WorkflowEdge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn with_entry_point(mut self, id: impl Into<String>) -> Self {
        self.entry_point = id.into();
        self
    }

    /// First node declared with the given id
    pub fn node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Outgoing edges of a node, in declaration order
    pub fn outgoing<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a WorkflowEdge> + 'a {
        self.edges.iter().filter(move |e| e.source == source)
    }
}

// SPDX-License-Identifier: MIT

//! Node behaviors
//!
//! A `WorkflowNode` carries an untyped config map. `NodeBehavior::from_node`
//! turns it into one of four typed behaviors:
//! - `llm` - ask the model and append its reply
//! - `tool` - run a registered tool and record its output
//! - `conditional` - compute a branch outcome into `next_action`
//! - `human` - structural pause marker; passes state through

mod conditional;
mod llm;
mod tool;

pub use conditional::{Condition, ConditionalConfig};
pub use llm::{to_turns, LlmConfig};
pub use tool::ToolConfig;

use crate::adk::error::FlowError;
use crate::adk::model::Model;
use crate::codeflow::workflow::registry::ToolRegistry;
use crate::codeflow::workflow::state::AgentState;
use crate::codeflow::workflow::types::{NodeType, WorkflowNode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Capabilities a node may call during execution
pub struct NodeContext<'a> {
    pub model: &'a dyn Model,
    pub registry: &'a ToolRegistry,
}

/// What a node produced
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOutcome {
    pub state: AgentState,
    /// Branch label computed by a conditional node, used for edge routing
    pub branch: Option<String>,
}

impl NodeOutcome {
    fn linear(state: AgentState) -> Self {
        Self {
            state,
            branch: None,
        }
    }
}

/// Typed behavior of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeBehavior {
    Llm(LlmConfig),
    Tool(ToolConfig),
    Conditional(ConditionalConfig),
    Human,
}

impl NodeBehavior {
    /// Resolve the behavior and typed config of a node
    pub fn from_node(node: &WorkflowNode) -> Result<Self, FlowError> {
        match &node.node_type {
            NodeType::Llm => Ok(Self::Llm(parse_config(node, &node.config)?)),
            NodeType::Tool => {
                let config: ToolConfig = parse_config(node, &node.config)?;
                if config.tool_name.is_empty() {
                    return Err(FlowError::config(format!(
                        "Tool node '{}' missing toolName in config",
                        node.id
                    )));
                }
                Ok(Self::Tool(config))
            }
            NodeType::Conditional => Ok(Self::Conditional(parse_config(node, &node.config)?)),
            NodeType::Human => Ok(Self::Human),
            NodeType::Unknown(tag) => Err(FlowError::UnknownNodeType(tag.clone())),
        }
    }

    /// Produce the next state from `state`; `state` itself is left untouched
    pub async fn execute(
        &self,
        ctx: &NodeContext<'_>,
        state: &AgentState,
    ) -> Result<NodeOutcome, FlowError> {
        match self {
            Self::Llm(config) => llm::execute(config, ctx.model, state)
                .await
                .map(NodeOutcome::linear),
            Self::Tool(config) => tool::execute(config, ctx.registry, state)
                .await
                .map(NodeOutcome::linear),
            Self::Conditional(config) => Ok(conditional::execute(config, state)),
            Self::Human => Ok(NodeOutcome::linear(state.clone())),
        }
    }
}

fn parse_config<T: DeserializeOwned>(
    node: &WorkflowNode,
    config: &Map<String, Value>,
) -> Result<T, FlowError> {
    serde_json::from_value(Value::Object(config.clone())).map_err(|e| {
        FlowError::config(format!(
            "invalid config for {} node '{}': {}",
            node.node_type, node.id, e
        ))
    })
}

/// `null` reads as the type's default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` and `""` both read as unset
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}

// SPDX-License-Identifier: MIT

//! Tool node - runs one registered tool and records its output

use crate::adk::error::FlowError;
use crate::codeflow::workflow::registry::ToolRegistry;
use crate::codeflow::workflow::state::{AgentState, Message, LAST_TOOL_RESULT, LAST_TOOL_SUCCEEDED};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolConfig {
    #[serde(deserialize_with = "super::null_as_default")]
    pub tool_name: String,
    #[serde(deserialize_with = "super::null_as_default")]
    pub args: Map<String, Value>,
    /// Copied onto the tool message when the call answers an assistant tool call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ToolConfig {
    /// Configured args, with `path` filled from the state's current file
    /// when the config does not set one
    pub fn args_for(&self, state: &AgentState) -> Map<String, Value> {
        let mut args = self.args.clone();
        if !args.contains_key("path") {
            if let Some(path) = state.current_file_path() {
                args.insert("path".to_string(), Value::String(path));
            }
        }
        args
    }
}

pub(super) async fn execute(
    config: &ToolConfig,
    registry: &ToolRegistry,
    state: &AgentState,
) -> Result<AgentState, FlowError> {
    let tool = registry
        .get(&config.tool_name)
        .await
        .ok_or_else(|| FlowError::tool_not_found(&config.tool_name))?;

    let args = config.args_for(state);
    log::info!("Running tool {} with args {:?}", config.tool_name, args);

    let output = tool.execute(Value::Object(args)).await;
    let succeeded = output.is_success();
    if !succeeded {
        log::warn!("Tool {} reported failure: {}", config.tool_name, output.message());
    }

    let message = output.into_message();
    let mut tool_message = Message::tool(message.clone());
    tool_message.tool_call_id = config.tool_call_id.clone();

    Ok(state
        .clone()
        .with_message(tool_message)
        .with_context(LAST_TOOL_RESULT, Value::String(message))
        .with_context(LAST_TOOL_SUCCEEDED, Value::Bool(succeeded)))
}

// SPDX-License-Identifier: MIT

//! The accumulating state value of a workflow run

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::message::Message;

/// Context key holding the transcript text of the most recent tool call
pub const LAST_TOOL_RESULT: &str = "lastToolResult";
/// Context key holding whether the most recent tool call succeeded
pub const LAST_TOOL_SUCCEEDED: &str = "lastToolSucceeded";

/// State passed from node to node.
///
/// Nodes never mutate the state they receive; each returns a new value
/// built with the `with_*` methods on a clone. Every field has a default,
/// so a caller can deserialize or build a partial state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentState {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_path: Option<String>,
    pub context: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
}

impl AgentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_current_file(mut self, file: impl Into<String>) -> Self {
        self.current_file = Some(file.into());
        self
    }

    pub fn with_project_path(mut self, path: impl Into<String>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    pub fn with_next_action(mut self, action: impl Into<String>) -> Self {
        self.next_action = Some(action.into());
        self
    }

    /// Most recent message, if any
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Text of the most recent tool call, when it was recorded as a string
    pub fn last_tool_result(&self) -> Option<&str> {
        self.context.get(LAST_TOOL_RESULT).and_then(Value::as_str)
    }

    /// Whether the most recent tool call reported failure.
    ///
    /// `None` when no tool has run or the flag was supplied by the caller
    /// as something other than a boolean.
    pub fn last_tool_failed(&self) -> Option<bool> {
        self.context
            .get(LAST_TOOL_SUCCEEDED)
            .and_then(Value::as_bool)
            .map(|ok| !ok)
    }

    /// Resolve the file the state points at: `project_path/current_file`,
    /// or just `current_file` when no project path is known
    pub fn current_file_path(&self) -> Option<String> {
        let file = self.current_file.as_deref()?;
        Some(match self.project_path.as_deref() {
            Some(project) => format!("{}/{}", project, file),
            None => file.to_string(),
        })
    }
}

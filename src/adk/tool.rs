// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a tool invocation.
///
/// Tools never raise: a failure is a value carrying the human-readable
/// message shown in the transcript (conventionally starting with "Error").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum ToolOutput {
    Success(String),
    Failure(String),
}

impl ToolOutput {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// Message to put in the transcript, regardless of outcome
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Failure(m) => m,
        }
    }

    pub fn into_message(self) -> String {
        match self {
            Self::Success(m) | Self::Failure(m) => m,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Trait for capabilities a tool node can invoke.
///
/// - `name()` and `description()` return `&str` to avoid allocation on every call
/// - `schema()` returns `&Value`; implementations keep it in a static or a field
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool name (registry key, unique)
    fn name(&self) -> &str;

    /// Returns a human-readable description of what the tool does
    fn description(&self) -> &str;

    /// Returns the JSON schema for the tool's input parameters
    fn schema(&self) -> &Value;

    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> ToolOutput;
}

// SPDX-License-Identifier: MIT

//! Typed error handling for codeflow-rs
//!
//! `FlowError` is the failure type of a workflow run. Any node-level
//! error aborts the run; the engine renders it into the result's
//! `error` string with `Display`.

use thiserror::Error;

/// Top-level error type for workflow execution
#[derive(Debug, Error)]
pub enum FlowError {
    /// Node configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Traversal reached a node id that is not declared in the workflow
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Traversal revisited a node
    #[error("Circular reference detected at node: {0}")]
    CycleDetected(String),

    /// Tool node names a tool that is not registered
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// The model provider answered with a non-success status
    #[error("LLM node error: model API error ({status}): {message}")]
    ModelInvocation { status: u16, message: String },

    /// Node type tag not recognized by the executor
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    /// Any other model capability failure (transport, bad payload, missing key)
    #[error("LLM node error: {0}")]
    Model(ModelError),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Model/LLM-specific errors
#[derive(Debug, Error)]
pub enum ModelError {
    /// API key not configured
    #[error("API key not configured for provider: {0}")]
    ApiKeyMissing(String),

    /// Model not supported by any configured provider
    #[error("Model not supported: {0}")]
    UnsupportedModel(String),

    /// Provider returned a non-2xx response
    #[error("{provider} API error ({status}): {message}")]
    Status {
        provider: String,
        status: u16,
        message: String,
    },

    /// Request never produced a response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Client settings rejected before any request is made
    #[error("Invalid model configuration: {0}")]
    Configuration(String),

    /// Invalid response from model
    #[error("Invalid response from model: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<ModelError> for FlowError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Status {
                status, message, ..
            } => Self::ModelInvocation { status, message },
            other => Self::Model(other),
        }
    }
}

impl FlowError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a tool not found error
    pub fn tool_not_found(name: impl Into<String>) -> Self {
        Self::ToolNotFound(name.into())
    }
}

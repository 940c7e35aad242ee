// SPDX-License-Identifier: MIT

//! Built-in tool capabilities
//!
//! - [fs] - read/write files, list and create directories
//! - [analyze] - naive code statistics
//! - [search] - placeholder that reports it is not implemented

pub mod analyze;
pub mod fs;
pub mod search;

use crate::adk::tool::{Tool, ToolOutput};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

/// Every built-in tool, one instance each
pub fn builtin_tools() -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(fs::ReadFileTool),
        Arc::new(fs::WriteFileTool),
        Arc::new(fs::ListDirectoryTool),
        Arc::new(fs::CreateDirectoryTool),
        Arc::new(analyze::AnalyzeCodeTool),
        Arc::new(search::SearchTool),
    ]
}

/// JSON schema for a tool's argument struct
pub(crate) fn schema_of<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({"type": "object"}))
}

/// Deserialize tool arguments, turning a mismatch into a failure output
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolOutput> {
    serde_json::from_value(args).map_err(|e| {
        ToolOutput::failure(format!("Error: invalid arguments for {}: {}", tool, e))
    })
}

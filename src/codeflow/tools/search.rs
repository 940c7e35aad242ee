// SPDX-License-Identifier: MIT

use super::{parse_args, schema_of};
use crate::adk::tool::{Tool, ToolOutput};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

static SEARCH_SCHEMA: Lazy<Value> = Lazy::new(schema_of::<SearchArgs>);

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchArgs {
    /// The pattern to search for
    pub pattern: String,
    /// The directory to search in
    pub directory: String,
    /// File extensions to include
    #[serde(default)]
    pub file_extensions: Option<Vec<String>>,
}

/// Text search over files.
///
/// Not implemented: every call reports failure so a downstream
/// `has_error` conditional can tell it apart from an empty result.
pub struct SearchTool;

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search"
    }

    fn description(&self) -> &str {
        "Search for text patterns in files (not implemented)"
    }

    fn schema(&self) -> &Value {
        &SEARCH_SCHEMA
    }

    async fn execute(&self, args: Value) -> ToolOutput {
        let args: SearchArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(out) => return out,
        };

        log::warn!(
            "search tool called for \"{}\" in {} (extensions: {:?}) but search is not implemented",
            args.pattern,
            args.directory,
            args.file_extensions.unwrap_or_default()
        );

        ToolOutput::failure(format!(
            "Error searching: search is not implemented (pattern \"{}\" in {})",
            args.pattern, args.directory
        ))
    }
}

// SPDX-License-Identifier: MIT

use super::{parse_args, schema_of};
use crate::adk::tool::{Tool, ToolOutput};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

// --- Static schemas ---

static READ_FILE_SCHEMA: Lazy<Value> = Lazy::new(schema_of::<ReadFileArgs>);
static WRITE_FILE_SCHEMA: Lazy<Value> = Lazy::new(schema_of::<WriteFileArgs>);
static LIST_DIRECTORY_SCHEMA: Lazy<Value> = Lazy::new(schema_of::<ListDirectoryArgs>);
static CREATE_DIRECTORY_SCHEMA: Lazy<Value> = Lazy::new(schema_of::<CreateDirectoryArgs>);

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadFileArgs {
    /// The path to the file to read
    pub path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct WriteFileArgs {
    /// The path to the file to write
    pub path: String,
    /// The content to write to the file
    pub content: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListDirectoryArgs {
    /// The path to the directory to list
    pub path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateDirectoryArgs {
    /// The path of the directory to create
    pub path: String,
    /// Create parent directories if they don't exist
    #[serde(default)]
    pub recursive: bool,
}

/// Entry of a `list_directory` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirEntryInfo {
    pub name: String,
    pub is_directory: bool,
}

pub struct ReadFileTool;

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a file"
    }

    fn schema(&self) -> &Value {
        &READ_FILE_SCHEMA
    }

    async fn execute(&self, args: Value) -> ToolOutput {
        let args: ReadFileArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(out) => return out,
        };

        match tokio::fs::read_to_string(&args.path).await {
            Ok(content) => ToolOutput::success(content),
            Err(e) => ToolOutput::failure(format!("Error reading file: {}: {}", args.path, e)),
        }
    }
}

pub struct WriteFileTool;

#[async_trait]
impl Tool for WriteFileTool {
    fn name(&self) -> &str {
        "write_file"
    }

    fn description(&self) -> &str {
        "Write content to a file, creating parent directories as needed"
    }

    fn schema(&self) -> &Value {
        &WRITE_FILE_SCHEMA
    }

    async fn execute(&self, args: Value) -> ToolOutput {
        let args: WriteFileArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(out) => return out,
        };

        if let Some(parent) = Path::new(&args.path).parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return ToolOutput::failure(format!(
                        "Error writing file: {}: {}",
                        args.path, e
                    ));
                }
            }
        }

        match tokio::fs::write(&args.path, args.content.as_bytes()).await {
            Ok(()) => ToolOutput::success(format!("Successfully wrote to file: {}", args.path)),
            Err(e) => ToolOutput::failure(format!("Error writing file: {}: {}", args.path, e)),
        }
    }
}

pub struct ListDirectoryTool;

impl ListDirectoryTool {
    async fn list(path: &str) -> std::io::Result<Vec<DirEntryInfo>> {
        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(path).await?;
        while let Some(entry) = dir.next_entry().await? {
            let is_directory = entry.file_type().await?.is_dir();
            entries.push(DirEntryInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_directory,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "List the contents of a directory"
    }

    fn schema(&self) -> &Value {
        &LIST_DIRECTORY_SCHEMA
    }

    async fn execute(&self, args: Value) -> ToolOutput {
        let args: ListDirectoryArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(out) => return out,
        };

        let entries = match Self::list(&args.path).await {
            Ok(entries) => entries,
            Err(e) => {
                return ToolOutput::failure(format!(
                    "Error listing directory: {}: {}",
                    args.path, e
                ))
            }
        };

        match serde_json::to_string_pretty(&entries) {
            Ok(json) => ToolOutput::success(json),
            Err(e) => ToolOutput::failure(format!("Error listing directory: {}", e)),
        }
    }
}

pub struct CreateDirectoryTool;

#[async_trait]
impl Tool for CreateDirectoryTool {
    fn name(&self) -> &str {
        "create_directory"
    }

    fn description(&self) -> &str {
        "Create a new directory"
    }

    fn schema(&self) -> &Value {
        &CREATE_DIRECTORY_SCHEMA
    }

    async fn execute(&self, args: Value) -> ToolOutput {
        let args: CreateDirectoryArgs = match parse_args(self.name(), args) {
            Ok(a) => a,
            Err(out) => return out,
        };

        let result = if args.recursive {
            tokio::fs::create_dir_all(&args.path).await
        } else {
            tokio::fs::create_dir(&args.path).await
        };

        match result {
            Ok(()) => ToolOutput::success(format!("Successfully created directory: {}", args.path)),
            Err(e) => ToolOutput::failure(format!(
                "Error creating directory: {}: {}",
                args.path, e
            )),
        }
    }
}

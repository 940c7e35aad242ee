// SPDX-License-Identifier: MIT

//! Workflow loader - YAML/JSON file loading and parsing

use super::types::Workflow;
use crate::adk::error::FlowError;
use std::fs;
use std::path::Path;

/// Loads workflow definitions from files
pub struct WorkflowLoader;

impl WorkflowLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a workflow: `.json` files as JSON, anything else as YAML
    pub fn load_workflow<P: AsRef<Path>>(&self, path: P) -> Result<Workflow, FlowError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let workflow = if is_json {
            Self::parse_json(&content)?
        } else {
            Self::parse_yaml(&content)?
        };
        log::debug!(
            "Loaded workflow '{}' with {} nodes from {}",
            workflow.id,
            workflow.nodes.len(),
            path.display()
        );
        Ok(workflow)
    }

    pub fn parse_yaml(content: &str) -> Result<Workflow, FlowError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn parse_json(content: &str) -> Result<Workflow, FlowError> {
        Ok(serde_json::from_str(content)?)
    }
}

impl Default for WorkflowLoader {
    fn default() -> Self {
        Self::new()
    }
}

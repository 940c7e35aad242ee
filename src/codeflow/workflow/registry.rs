// SPDX-License-Identifier: MIT

use crate::adk::tool::Tool;
use crate::codeflow::tools;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Name → tool capability mapping shared by every run of an engine.
///
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct ToolRegistry {
    tools: Arc<RwLock<HashMap<String, Arc<dyn Tool>>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Build a registry from a fixed set of tools; later names win
    pub fn from_tools(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        let map: HashMap<String, Arc<dyn Tool>> = tools
            .into_iter()
            .map(|t| (t.name().to_string(), t))
            .collect();
        Self {
            tools: Arc::new(RwLock::new(map)),
        }
    }

    /// Registry holding the built-in file and analysis tools
    pub fn with_builtins() -> Self {
        Self::from_tools(tools::builtin_tools())
    }

    pub async fn register(&self, tool: Arc<dyn Tool>) {
        let mut tools = self.tools.write().await;
        if tools.insert(tool.name().to_string(), tool).is_some() {
            log::debug!("Replaced an existing tool registration");
        }
    }

    pub async fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        tools.get(name).cloned()
    }

    /// Tools for the given names, in request order; unknown names are skipped
    pub async fn get_by_names(&self, names: &[&str]) -> Vec<Arc<dyn Tool>> {
        let tools = self.tools.read().await;
        names.iter().filter_map(|n| tools.get(*n).cloned()).collect()
    }

    /// Registered names, sorted
    pub async fn names(&self) -> Vec<String> {
        let tools = self.tools.read().await;
        let mut names: Vec<String> = tools.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

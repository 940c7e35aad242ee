// SPDX-License-Identifier: MIT

//! Execution record of a single workflow run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::state::AgentState;

/// One completed node execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionStep {
    pub node_id: String,
    pub node_name: String,
    /// State the node received
    pub input: AgentState,
    /// State the node produced
    pub output: AgentState,
    /// Wall time spent in the node, milliseconds on the wire
    #[serde(with = "duration_millis")]
    pub duration: Duration,
    /// When the node finished
    pub timestamp: DateTime<Utc>,
}

/// Result of `WorkflowEngine::execute_workflow`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphExecutionResult {
    pub run_id: String,
    pub success: bool,
    /// Final state; `None` when the run failed
    pub output: Option<AgentState>,
    pub steps: Vec<ExecutionStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GraphExecutionResult {
    pub fn succeeded(run_id: String, output: AgentState, steps: Vec<ExecutionStep>) -> Self {
        Self {
            run_id,
            success: true,
            output: Some(output),
            steps,
            error: None,
        }
    }

    pub fn failed(run_id: String, error: String, steps: Vec<ExecutionStep>) -> Self {
        Self {
            run_id,
            success: false,
            output: None,
            steps,
            error: Some(error),
        }
    }

    /// Content of the last transcript message of a successful run
    pub fn final_reply(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|s| s.last_message())
            .map(|m| m.content.as_str())
    }
}

/// Step log accumulated during one run
#[derive(Debug, Default)]
pub struct ExecutionRecord {
    steps: Vec<ExecutionStep>,
}

impl ExecutionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: ExecutionStep) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn into_steps(self) -> Vec<ExecutionStep> {
        self.steps
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

// SPDX-License-Identifier: MIT

//! Graph traversal controller

use crate::adk::error::FlowError;
use crate::adk::model::Model;
use crate::codeflow::config::EngineConfig;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use super::nodes::{NodeBehavior, NodeContext};
use super::record::{ExecutionRecord, ExecutionStep, GraphExecutionResult};
use super::registry::ToolRegistry;
use super::routing::{is_terminal, next_node};
use super::state::AgentState;
use super::types::Workflow;

/// Runs workflow definitions against a model and a tool registry.
///
/// The engine holds only immutable configuration, so one instance can
/// serve concurrent `execute_workflow` calls.
pub struct WorkflowEngine {
    model: Arc<dyn Model>,
    registry: ToolRegistry,
    config: EngineConfig,
}

impl WorkflowEngine {
    pub fn new(model: Arc<dyn Model>, registry: ToolRegistry) -> Self {
        Self::with_config(model, registry, EngineConfig::default())
    }

    pub fn with_config(model: Arc<dyn Model>, registry: ToolRegistry, config: EngineConfig) -> Self {
        Self {
            model,
            registry,
            config,
        }
    }

    /// Walk `workflow` from its entry point, threading `initial` through every node.
    ///
    /// Never fails: errors come back as `success == false` with the steps
    /// completed before the failing node.
    pub async fn execute_workflow(
        &self,
        workflow: &Workflow,
        initial: AgentState,
    ) -> GraphExecutionResult {
        let run_id = Uuid::new_v4().to_string();
        let mut record = ExecutionRecord::new();

        log::info!(
            "[{}] Executing workflow '{}' from entry point '{}'",
            run_id,
            workflow.id,
            workflow.entry_point
        );

        match self.run(&run_id, workflow, initial, &mut record).await {
            Ok(state) => {
                log::info!(
                    "[{}] Workflow '{}' completed in {} steps",
                    run_id,
                    workflow.id,
                    record.len()
                );
                GraphExecutionResult::succeeded(run_id, state, record.into_steps())
            }
            Err(e) => {
                log::error!(
                    "[{}] Workflow '{}' failed after {} steps: {}",
                    run_id,
                    workflow.id,
                    record.len(),
                    e
                );
                GraphExecutionResult::failed(run_id, e.to_string(), record.into_steps())
            }
        }
    }

    async fn run(
        &self,
        run_id: &str,
        workflow: &Workflow,
        initial: AgentState,
        record: &mut ExecutionRecord,
    ) -> Result<AgentState, FlowError> {
        let ctx = NodeContext {
            model: self.model.as_ref(),
            registry: &self.registry,
        };
        let mut state = initial;
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = workflow.entry_point.clone();

        while !is_terminal(&current) {
            if !visited.insert(current.clone()) {
                return Err(FlowError::CycleDetected(current));
            }

            let node = workflow
                .node(&current)
                .ok_or_else(|| FlowError::NodeNotFound(current.clone()))?;
            let behavior = NodeBehavior::from_node(node)?;

            log::info!(
                "[{}] Executing node {} ({}, {})",
                run_id,
                node.id,
                node.name,
                node.node_type
            );
            let started = Instant::now();
            let outcome = behavior.execute(&ctx, &state).await?;
            let duration = started.elapsed();
            log::info!("[{}] Node {} completed in {:?}", run_id, node.id, duration);

            current = next_node(
                workflow,
                &node.id,
                outcome.branch.as_deref(),
                self.config.routing,
            );

            record.push(ExecutionStep {
                node_id: node.id.clone(),
                node_name: node.name.clone(),
                input: state,
                output: outcome.state.clone(),
                duration,
                timestamp: Utc::now(),
            });
            state = outcome.state;
        }

        Ok(state)
    }
}

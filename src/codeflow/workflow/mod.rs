// SPDX-License-Identifier: MIT

//! Graph workflow runtime
//!
//! A [`Workflow`] is a set of nodes joined by directed edges. The
//! [`WorkflowEngine`] walks it from the entry point, running each node
//! against the shared [`AgentState`] until it reaches `END`.

pub mod engine;
pub mod loader;
pub mod nodes;
pub mod presets;
pub mod record;
pub mod registry;
pub mod routing;
pub mod state;
pub mod types;

pub use engine::WorkflowEngine;
pub use loader::WorkflowLoader;
pub use record::{ExecutionStep, GraphExecutionResult};
pub use registry::ToolRegistry;
pub use routing::Routing;
pub use state::AgentState;
pub use types::{NodeType, Workflow, WorkflowEdge, WorkflowNode, END};

// SPDX-License-Identifier: MIT

//! State threaded through a workflow run
//!
//! This module provides:
//! - `Message` / `Role` / `ToolCall` - transcript entries
//! - `AgentState` - the value every node receives and replaces

mod message;
mod store;

pub use message::{Message, Role, ToolCall};
pub use store::{AgentState, LAST_TOOL_RESULT, LAST_TOOL_SUCCEEDED};

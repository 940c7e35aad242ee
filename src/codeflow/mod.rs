// SPDX-License-Identifier: MIT

//! Code-assistant workflows: built-in tools, engine configuration and
//! the graph workflow runtime.

pub mod config;
pub mod tools;
pub mod workflow;

// SPDX-License-Identifier: MIT

//! Conditional node - evaluates a named condition into `next_action`

use super::NodeOutcome;
use crate::codeflow::workflow::state::AgentState;
use serde::{Deserialize, Deserializer, Serialize};

/// Recognized condition names; anything else evaluates to `"default"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Condition {
    HasError,
    HasFile,
    Other(String),
}

impl From<String> for Condition {
    fn from(s: String) -> Self {
        match s.as_str() {
            "has_error" => Condition::HasError,
            "has_file" => Condition::HasFile,
            _ => Condition::Other(s),
        }
    }
}

impl From<Condition> for String {
    fn from(c: Condition) -> Self {
        match c {
            Condition::HasError => "has_error".to_string(),
            Condition::HasFile => "has_file".to_string(),
            Condition::Other(s) => s,
        }
    }
}

impl Condition {
    pub fn evaluate(&self, state: &AgentState) -> &'static str {
        match self {
            Condition::HasError => {
                let failed = state.last_tool_failed().unwrap_or(false)
                    || state
                        .last_tool_result()
                        .is_some_and(|r| r.contains("Error"));
                if failed {
                    "error"
                } else {
                    "success"
                }
            }
            Condition::HasFile => {
                if state.current_file.is_some() {
                    "with_file"
                } else {
                    "no_file"
                }
            }
            Condition::Other(_) => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionalConfig {
    /// `null` and `""` mean no condition
    #[serde(deserialize_with = "condition_if_named")]
    pub condition: Option<Condition>,
}

fn condition_if_named<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Condition>, D::Error> {
    Ok(super::non_empty(d)?.map(Condition::from))
}

/// Without a condition the state passes through and no branch is taken
pub(super) fn execute(config: &ConditionalConfig, state: &AgentState) -> NodeOutcome {
    match &config.condition {
        None => NodeOutcome {
            state: state.clone(),
            branch: None,
        },
        Some(condition) => {
            let outcome = condition.evaluate(state);
            log::info!("Condition {:?} evaluated to {}", condition, outcome);
            NodeOutcome {
                state: state.clone().with_next_action(outcome),
                branch: Some(outcome.to_string()),
            }
        }
    }
}

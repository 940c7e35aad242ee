// SPDX-License-Identifier: MIT

//! LLM node - one model call, one appended assistant message

use crate::adk::error::FlowError;
use crate::adk::model::{GenerationConfig, Model, ModelRequest, Turn};
use crate::codeflow::workflow::state::{AgentState, Message, Role};
use super::non_empty;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmConfig {
    #[serde(deserialize_with = "system_prompt_or_default")]
    pub system_prompt: String,
    #[serde(deserialize_with = "model_or_default")]
    pub model: String,
    /// `0.0` is a valid setting; only `null` falls back
    #[serde(deserialize_with = "temperature_or_default")]
    pub temperature: f32,
    #[serde(deserialize_with = "max_tokens_or_default")]
    pub max_tokens: u32,
}

fn system_prompt_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(non_empty(d)?.unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()))
}

fn model_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(non_empty(d)?.unwrap_or_else(|| DEFAULT_MODEL.to_string()))
}

fn temperature_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<f32, D::Error> {
    Ok(Option::<f32>::deserialize(d)?.unwrap_or(DEFAULT_TEMPERATURE))
}

fn max_tokens_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(d)?
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_MAX_TOKENS))
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Convert transcript messages into provider turns.
///
/// Providers take only user/assistant turns plus a top-level system
/// prompt, so `system` history entries become assistant turns and tool
/// output is fed back as user turns.
pub fn to_turns(messages: &[Message]) -> Vec<Turn> {
    messages
        .iter()
        .map(|m| match m.role {
            Role::User | Role::Tool => Turn::user(m.content.clone()),
            Role::Assistant | Role::System => Turn::assistant(m.content.clone()),
        })
        .collect()
}

pub(super) async fn execute(
    config: &LlmConfig,
    model: &dyn Model,
    state: &AgentState,
) -> Result<AgentState, FlowError> {
    let request = ModelRequest {
        model: config.model.clone(),
        messages: to_turns(&state.messages),
        system: Some(config.system_prompt.clone()),
        config: GenerationConfig {
            temperature: Some(config.temperature),
            max_output_tokens: Some(config.max_tokens),
            ..Default::default()
        },
    };

    log::debug!(
        "Calling model {} with {} turns",
        request.model,
        request.messages.len()
    );
    let response = model.generate(&request).await?;

    Ok(state.clone().with_message(Message::assistant(response.text)))
}

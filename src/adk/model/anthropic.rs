// SPDX-License-Identifier: MIT

//! Anthropic Model - Claude Messages API implementation

use super::{provider_error_message, Model, ModelRequest, ModelResponse};
use crate::adk::error::ModelError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_MAX_TOKENS: u32 = 4000;

/// Anthropic Claude model client
pub struct AnthropicModel {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AnthropicModel {
    /// Create a client with an explicit credential and endpoint
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, ModelError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ModelError::ApiKeyMissing("Anthropic".to_string()));
        }

        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(|e| {
            ModelError::Configuration(format!("invalid Anthropic base URL '{}': {}", base_url, e))
        })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the Messages API request body
    fn request_body(request: &ModelRequest) -> serde_json::Value {
        let messages: Vec<serde_json::Value> = request
            .messages
            .iter()
            .map(|t| {
                json!({
                    "role": t.role.as_str(),
                    "content": t.content
                })
            })
            .collect();

        let mut body = json!({
            "model": request.model,
            "messages": messages,
            "max_tokens": request.config.max_output_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
        });

        if let Some(sys) = &request.system {
            body["system"] = json!(sys);
        }
        if let Some(temp) = request.config.temperature {
            body["temperature"] = json!(temp);
        }
        if let Some(top_p) = request.config.top_p {
            body["top_p"] = json!(top_p);
        }
        if let Some(top_k) = request.config.top_k {
            body["top_k"] = json!(top_k);
        }

        body
    }

    /// Take the first text block of a Messages API response
    fn parse_response(response: &serde_json::Value) -> Result<ModelResponse, ModelError> {
        let blocks = response["content"]
            .as_array()
            .ok_or_else(|| ModelError::InvalidResponse("No content in Anthropic response".into()))?;

        let text = blocks
            .iter()
            .find(|b| b["type"] == "text")
            .and_then(|b| b["text"].as_str())
            .ok_or_else(|| {
                ModelError::InvalidResponse("No text block in Anthropic response".into())
            })?;

        let stop_reason = response["stop_reason"].as_str().map(str::to_string);
        if let Some(reason) = &stop_reason {
            log::debug!("Anthropic stop reason: {}", reason);
        }

        Ok(ModelResponse {
            text: text.to_string(),
            stop_reason,
        })
    }
}

#[async_trait]
impl Model for AnthropicModel {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = format!("{}/messages", self.base_url);
        let body = Self::request_body(request);

        log::debug!(
            "Anthropic request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );

        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            let message = if text.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                provider_error_message(&text)
            };
            return Err(ModelError::Status {
                provider: "Anthropic".to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let resp_json: serde_json::Value = resp.json().await?;
        log::debug!("Anthropic response: {}", resp_json);

        Self::parse_response(&resp_json)
    }
}

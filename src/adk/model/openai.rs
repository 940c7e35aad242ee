// SPDX-License-Identifier: MIT

//! OpenAI Model - Chat Completions API implementation

use super::{provider_error_message, Model, ModelRequest, ModelResponse};
use crate::adk::error::ModelError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI chat model client
pub struct OpenAIModel {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIModel {
    /// Create a client with an explicit credential and endpoint
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, ModelError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ModelError::ApiKeyMissing("OpenAI".to_string()));
        }

        let base_url = base_url.into();
        url::Url::parse(&base_url).map_err(|e| {
            ModelError::Configuration(format!("invalid OpenAI base URL '{}': {}", base_url, e))
        })?;

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The system prompt travels as a leading `system` message
    fn request_body(request: &ModelRequest) -> serde_json::Value {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(sys) = &request.system {
            messages.push(json!({"role": "system", "content": sys}));
        }
        messages.extend(
            request
                .messages
                .iter()
                .map(|t| json!({"role": t.role.as_str(), "content": t.content})),
        );

        let mut body = json!({
            "model": request.model,
            "messages": messages
        });

        if let Some(temp) = request.config.temperature {
            body["temperature"] = json!(temp);
        }
        if let Some(max_tokens) = request.config.max_output_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(top_p) = request.config.top_p {
            body["top_p"] = json!(top_p);
        }

        body
    }

    fn parse_response(response: &serde_json::Value) -> Result<ModelResponse, ModelError> {
        let choice = response["choices"]
            .as_array()
            .and_then(|c| c.first())
            .ok_or_else(|| ModelError::InvalidResponse("No choices in OpenAI response".into()))?;

        let text = choice["message"]["content"]
            .as_str()
            .ok_or_else(|| ModelError::InvalidResponse("No text in OpenAI response".into()))?;

        Ok(ModelResponse {
            text: text.to_string(),
            stop_reason: choice["finish_reason"].as_str().map(str::to_string),
        })
    }
}

#[async_trait]
impl Model for OpenAIModel {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = Self::request_body(request);

        log::debug!(
            "OpenAI request body: {}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
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
                provider: "OpenAI".to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let resp_json: serde_json::Value = resp.json().await?;
        log::debug!("OpenAI response: {}", resp_json);

        Self::parse_response(&resp_json)
    }
}

// SPDX-License-Identifier: MIT

//! Routes each request to a provider client based on its model id

use super::{Model, ModelRequest, ModelResponse};
use crate::adk::error::ModelError;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl Provider {
    /// Infer the provider from a model id, if the prefix is recognizable
    pub fn infer(model: &str) -> Option<Self> {
        if model.starts_with("claude") {
            Some(Provider::Anthropic)
        } else if model.starts_with("gpt") || model.starts_with("o1") || model.starts_with("o3") {
            Some(Provider::OpenAI)
        } else {
            None
        }
    }
}

impl FromStr for Provider {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Provider::Anthropic),
            "openai" => Ok(Provider::OpenAI),
            other => Err(ModelError::UnsupportedModel(format!("unknown provider: {}", other))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Anthropic => write!(f, "Anthropic"),
            Provider::OpenAI => write!(f, "OpenAI"),
        }
    }
}

/// A `Model` that forwards to whichever configured provider serves the model id
pub struct ModelRouter {
    anthropic: Option<Arc<dyn Model>>,
    openai: Option<Arc<dyn Model>>,
    fallback: Provider,
}

impl ModelRouter {
    pub fn new(fallback: Provider) -> Self {
        Self {
            anthropic: None,
            openai: None,
            fallback,
        }
    }

    pub fn with_anthropic(mut self, model: Arc<dyn Model>) -> Self {
        self.anthropic = Some(model);
        self
    }

    pub fn with_openai(mut self, model: Arc<dyn Model>) -> Self {
        self.openai = Some(model);
        self
    }

    fn select(&self, model: &str) -> Result<&Arc<dyn Model>, ModelError> {
        let provider = Provider::infer(model).unwrap_or(self.fallback);
        let client = match provider {
            Provider::Anthropic => self.anthropic.as_ref(),
            Provider::OpenAI => self.openai.as_ref(),
        };
        client.ok_or_else(|| ModelError::ApiKeyMissing(provider.to_string()))
    }
}

#[async_trait]
impl Model for ModelRouter {
    async fn generate(&self, request: &ModelRequest) -> Result<ModelResponse, ModelError> {
        self.select(&request.model)?.generate(request).await
    }
}

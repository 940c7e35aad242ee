// SPDX-License-Identifier: MIT

//! Engine options and provider settings
//!
//! Credentials are read once (from the environment or a `.env` file loaded
//! by the binary) and handed to model constructors explicitly.

use crate::adk::error::ModelError;
use crate::adk::model::anthropic::{self, AnthropicModel};
use crate::adk::model::openai::{self, OpenAIModel};
use crate::adk::model::router::{ModelRouter, Provider};
use crate::adk::model::Model;
use crate::codeflow::workflow::routing::Routing;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Options fixed for the lifetime of an engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub routing: Routing,
}

/// Credentials and endpoints for model providers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub anthropic_api_key: Option<String>,
    pub anthropic_base_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    /// Provider for model ids without a recognizable prefix
    pub default_provider: Provider,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            anthropic_api_key: None,
            anthropic_base_url: anthropic::DEFAULT_BASE_URL.to_string(),
            openai_api_key: None,
            openai_base_url: openai::DEFAULT_BASE_URL.to_string(),
            default_provider: Provider::Anthropic,
        }
    }
}

impl ProviderSettings {
    /// Read `ANTHROPIC_API_KEY`, `ANTHROPIC_BASE_URL`, `OPENAI_API_KEY`,
    /// `OPENAI_BASE_URL` and `MODEL_PROVIDER` from the environment
    pub fn from_env() -> Result<Self, ModelError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ModelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let default_provider = match get("MODEL_PROVIDER") {
            Some(p) => p.parse()?,
            None => defaults.default_provider,
        };

        Ok(Self {
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            anthropic_base_url: get("ANTHROPIC_BASE_URL").unwrap_or(defaults.anthropic_base_url),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            default_provider,
        })
    }

    /// Router over every provider that has a credential.
    ///
    /// With no credentials the router is still built, so workflows without
    /// `llm` nodes run; an `llm` node then fails with `ApiKeyMissing`.
    pub fn build_model(&self) -> Result<Arc<dyn Model>, ModelError> {
        let mut router = ModelRouter::new(self.default_provider);
        let mut configured = 0;

        if let Some(key) = &self.anthropic_api_key {
            router = router.with_anthropic(Arc::new(AnthropicModel::new(
                key.clone(),
                self.anthropic_base_url.clone(),
            )?));
            configured += 1;
        }
        if let Some(key) = &self.openai_api_key {
            router = router.with_openai(Arc::new(OpenAIModel::new(
                key.clone(),
                self.openai_base_url.clone(),
            )?));
            configured += 1;
        }

        if configured == 0 {
            log::warn!("No model provider credentials configured; llm nodes will fail");
        } else {
            log::info!(
                "Configured {} model provider(s), default {}",
                configured,
                self.default_provider
            );
        }

        Ok(Arc::new(router))
    }
}

use crate::prelude::*;
use async_trait::async_trait;
use docgen_core::providers::claude::{
    build_messages_request, known_models, response_text, MessagesResponse, API_VERSION,
};

use super::{
    api_key_from_env, normalize_base_url, read_json, request_error, GenerateOptions, Provider,
    ProviderKind,
};

const KIND: ProviderKind = ProviderKind::Claude;
const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Anthropic Claude configuration
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl ClaudeConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com/v1";
    pub const DEFAULT_MODEL: &'static str = "claude-3-haiku-20240307";

    /// Load configuration from environment variables
    /// Uses ANTHROPIC_API_KEY for auth and ANTHROPIC_BASE_URL with default fallback
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
            api_key: api_key_from_env(API_KEY_VAR),
            model: Self::DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}

pub struct ClaudeProvider {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl ClaudeProvider {
    pub fn new(config: ClaudeConfig) -> Self {
        Self {
            base_url: normalize_base_url(&config.base_url),
            api_key: config.api_key,
            model: config.model,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Provider for ClaudeProvider {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    // There is no cheap probe endpoint; a configured key is the health signal.
    async fn health_check(&self) -> bool {
        self.api_key.is_some()
    }

    async fn list_models(&self) -> Vec<String> {
        known_models()
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, Error> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(Error::MissingCredential(API_KEY_VAR))?;
        let model = options.model.as_deref().unwrap_or(&self.model);

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&build_messages_request(model, prompt, options))
            .send()
            .await
            .map_err(|source| request_error(KIND, source))?;

        let data: MessagesResponse = read_json(KIND, response).await?;
        Ok(response_text(data))
    }
}

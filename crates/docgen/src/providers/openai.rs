use crate::prelude::*;
use async_trait::async_trait;
use docgen_core::providers::openai::{
    build_chat_request, model_names, response_text, ChatCompletionResponse, ModelsResponse,
};

use super::{
    api_key_from_env, normalize_base_url, probe, read_json, request_error, GenerateOptions,
    Provider, ProviderKind,
};

const KIND: ProviderKind = ProviderKind::OpenAi;
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// OpenAI configuration
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl OpenAiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &'static str = "gpt-4o-mini";

    /// Load configuration from environment variables
    /// Uses OPENAI_API_KEY for auth and OPENAI_BASE_URL with default fallback
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
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

pub struct OpenAiProvider {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            base_url: normalize_base_url(&config.base_url),
            api_key: config.api_key,
            model: config.model,
            client: reqwest::Client::new(),
        }
    }

    fn models_request(&self, api_key: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(api_key)
    }
}

#[async_trait]
impl Provider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    async fn health_check(&self) -> bool {
        match &self.api_key {
            Some(key) => probe(self.models_request(key)).await,
            None => false,
        }
    }

    async fn list_models(&self) -> Vec<String> {
        let Some(key) = &self.api_key else {
            return Vec::new();
        };

        let response = match self.models_request(key).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("Could not list OpenAI models: {e}");
                return Vec::new();
            }
        };

        match read_json::<ModelsResponse>(KIND, response).await {
            Ok(models) => model_names(models),
            Err(e) => {
                log::debug!("Could not list OpenAI models: {e}");
                Vec::new()
            }
        }
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, Error> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(Error::MissingCredential(API_KEY_VAR))?;
        let model = options.model.as_deref().unwrap_or(&self.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&build_chat_request(model, prompt, options))
            .send()
            .await
            .map_err(|source| request_error(KIND, source))?;

        let data: ChatCompletionResponse = read_json(KIND, response).await?;
        Ok(response_text(data))
    }
}

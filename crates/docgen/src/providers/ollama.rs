use crate::prelude::*;
use async_trait::async_trait;
use docgen_core::providers::ollama::{
    build_generate_request, model_names, GenerateResponse, TagsResponse,
};

use super::{
    normalize_base_url, probe, read_json, request_error, GenerateOptions, Provider, ProviderKind,
};

const KIND: ProviderKind = ProviderKind::Ollama;

/// Local Ollama configuration
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

impl OllamaConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";
    pub const DEFAULT_MODEL: &'static str = "llama3.2";

    /// Load configuration from environment variables
    /// Uses OLLAMA_URL with default fallback
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
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

pub struct OllamaProvider {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            base_url: normalize_base_url(&config.base_url),
            model: config.model,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_tags(&self) -> Result<TagsResponse, Error> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|source| request_error(KIND, source))?;

        read_json(KIND, response).await
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn kind(&self) -> ProviderKind {
        KIND
    }

    async fn health_check(&self) -> bool {
        probe(self.client.get(format!("{}/api/tags", self.base_url))).await
    }

    async fn list_models(&self) -> Vec<String> {
        match self.fetch_tags().await {
            Ok(tags) => model_names(tags),
            Err(e) => {
                log::debug!("Could not list Ollama models: {e}");
                Vec::new()
            }
        }
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, Error> {
        let model = options.model.as_deref().unwrap_or(&self.model);
        let body = build_generate_request(model, prompt, options);

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|source| request_error(KIND, source))?;

        let data: GenerateResponse = read_json(KIND, response).await?;
        Ok(data.response)
    }
}

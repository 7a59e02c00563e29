use crate::prelude::*;
use async_trait::async_trait;
use docgen_core::providers::gemini::{
    build_generate_request, model_names, response_text, GenerateContentResponse, ModelsResponse,
};

use super::{
    api_key_from_env, normalize_base_url, probe, read_json, request_error, GenerateOptions,
    Provider, ProviderKind,
};

const KIND: ProviderKind = ProviderKind::Gemini;
const API_KEY_VAR: &str = "GEMINI_API_KEY";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl GeminiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_MODEL: &'static str = "gemini-2.0-flash";

    /// Load configuration from environment variables
    /// Uses GEMINI_API_KEY for auth and GEMINI_BASE_URL with default fallback
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("GEMINI_BASE_URL")
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

pub struct GeminiProvider {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
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
            .header(API_KEY_HEADER, api_key)
    }

    async fn fetch_models(&self, api_key: &str) -> Result<ModelsResponse, Error> {
        let response = self
            .models_request(api_key)
            .send()
            .await
            .map_err(|source| request_error(KIND, source))?;

        read_json(KIND, response).await
    }
}

#[async_trait]
impl Provider for GeminiProvider {
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

        match self.fetch_models(key).await {
            Ok(models) => model_names(models),
            Err(e) => {
                log::debug!("Could not list Gemini models: {e}");
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
            .post(format!("{}/models/{model}:generateContent", self.base_url))
            .header(API_KEY_HEADER, api_key)
            .json(&build_generate_request(prompt, options))
            .send()
            .await
            .map_err(|source| request_error(KIND, source))?;

        let data: GenerateContentResponse = read_json(KIND, response).await?;
        Ok(response_text(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(base_url: &str, api_key: Option<&str>) -> GeminiProvider {
        GeminiProvider::new(GeminiConfig {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
            model: GeminiConfig::DEFAULT_MODEL.to_string(),
        })
    }

    #[tokio::test]
    async fn test_missing_key() {
        let gemini = provider("http://127.0.0.1:1", None);

        assert!(!gemini.health_check().await);
        assert!(gemini.list_models().await.is_empty());

        let err = gemini
            .generate("p", &GenerateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingCredential("GEMINI_API_KEY")));
        assert_eq!(err.to_string(), "GEMINI_API_KEY is not set");
    }

    #[tokio::test]
    async fn test_generate_with_model_override() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-1.5-pro:generateContent"))
            .and(header("x-goog-api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "generated"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let options = GenerateOptions {
            model: Some("gemini-1.5-pro".to_string()),
            ..Default::default()
        };
        let text = provider(&server.uri(), Some("secret"))
            .generate("p", &options)
            .await
            .unwrap();

        assert_eq!(text, "generated");
    }

    #[tokio::test]
    async fn test_health_and_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("x-goog-api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [
                    {"name": "models/gemini-2.0-flash"},
                    {"name": "models/text-embedding-004"}
                ]
            })))
            .mount(&server)
            .await;

        let gemini = provider(&server.uri(), Some("secret"));
        assert!(gemini.health_check().await);
        assert_eq!(gemini.list_models().await, vec!["gemini-2.0-flash"]);
    }

    #[tokio::test]
    async fn test_key_is_not_sent_in_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(query_param_is_missing("key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = provider(&server.uri(), Some("secret"))
            .generate("p", &GenerateOptions::default())
            .await
            .unwrap();

        assert_eq!(text, "ok");
    }

    #[tokio::test]
    async fn test_connection_error_does_not_leak_key() {
        let gemini = provider("http://127.0.0.1:1", Some("SUPERSECRET"));

        let err = gemini
            .generate("p", &GenerateOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Request { provider: "Gemini", .. }));

        let report = format!("{:#}", color_eyre::eyre::Report::from(err));
        assert!(!report.contains("SUPERSECRET"), "{report}");
    }

    #[tokio::test]
    async fn test_rejected_key_is_unhealthy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let gemini = provider(&server.uri(), Some("bad"));
        assert!(!gemini.health_check().await);
        assert!(gemini.list_models().await.is_empty());
    }
}

use crate::prelude::*;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub mod claude;
pub mod gemini;
pub mod ollama;
pub mod openai;

pub use docgen_core::providers::{GenerateOptions, ProviderKind};

/// A text-generation backend.
///
/// Every adapter owns only its configuration, fixed at construction. The
/// orchestrator talks to backends through this trait alone.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Which backend this adapter talks to.
    fn kind(&self) -> ProviderKind;

    /// Whether the backend is usable right now. Never fails; any network or
    /// credential problem reads as unhealthy.
    async fn health_check(&self) -> bool;

    /// Best-effort list of model identifiers, empty on any failure.
    async fn list_models(&self) -> Vec<String>;

    /// Send a prompt and return the generated text.
    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String, Error>;
}

/// Build the provider registered under `name`.
///
/// `model` replaces the provider's default model when set.
pub fn create_provider(name: &str, model: Option<String>) -> Result<Box<dyn Provider>, Error> {
    let kind = ProviderKind::from_id(name).ok_or_else(|| Error::UnknownProvider {
        name: name.to_string(),
        available: ProviderKind::available(),
    })?;

    log::debug!("Creating provider {kind} (model override: {model:?})");

    let provider: Box<dyn Provider> = match kind {
        ProviderKind::Ollama => Box::new(ollama::OllamaProvider::new(
            ollama::OllamaConfig::from_env().with_model(model),
        )),
        ProviderKind::Gemini => Box::new(gemini::GeminiProvider::new(
            gemini::GeminiConfig::from_env().with_model(model),
        )),
        ProviderKind::Claude => Box::new(claude::ClaudeProvider::new(
            claude::ClaudeConfig::from_env().with_model(model),
        )),
        ProviderKind::OpenAi => Box::new(openai::OpenAiProvider::new(
            openai::OpenAiConfig::from_env().with_model(model),
        )),
    };

    Ok(provider)
}

/// Read an API key from the environment. Empty values count as unset.
pub(crate) fn api_key_from_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|key| !key.trim().is_empty())
}

/// Strip trailing slashes so paths can be appended with `/`.
pub(crate) fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Wrap a transport error. The request URL is dropped from the message since
/// it may carry credentials.
pub(crate) fn request_error(kind: ProviderKind, source: reqwest::Error) -> Error {
    Error::Request {
        provider: kind.display_name(),
        source: source.without_url(),
    }
}

/// Decode a backend response, turning non-success statuses into
/// [`Error::Generation`] with the response body as message.
pub(crate) async fn read_json<T: DeserializeOwned>(
    kind: ProviderKind,
    response: reqwest::Response,
) -> Result<T, Error> {
    let provider = kind.display_name();
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| request_error(kind, source))?;

    if !status.is_success() {
        return Err(Error::Generation {
            provider,
            status: status.as_u16(),
            message: body,
        });
    }

    serde_json::from_str(&body).map_err(|e| Error::InvalidResponse {
        provider,
        message: e.to_string(),
    })
}

/// Whether a probe request came back with a success status.
pub(crate) async fn probe(request: reqwest::RequestBuilder) -> bool {
    match request.send().await {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            log::debug!("Health probe failed: {}", e.without_url());
            false
        }
    }
}

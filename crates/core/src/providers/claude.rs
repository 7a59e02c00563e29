use serde::{Deserialize, Serialize};

use super::{ChatMessage, GenerateOptions};

/// Value of the `anthropic-version` header.
pub const API_VERSION: &str = "2023-06-01";

/// Output budget when the caller does not set one.
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

/// The Messages API has no listing endpoint, so the known models are fixed.
pub const KNOWN_MODELS: [&str; 4] = [
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
    "claude-3-5-sonnet-20241022",
];

/// Body of `POST /messages`.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub text: String,
}

pub fn build_messages_request(
    model: &str,
    prompt: &str,
    options: &GenerateOptions,
) -> MessagesRequest {
    MessagesRequest {
        model: model.to_string(),
        max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        temperature: options.temperature,
        messages: vec![ChatMessage::user(prompt)],
    }
}

/// Text of the first content block, empty when there is none.
pub fn response_text(response: MessagesResponse) -> String {
    response
        .content
        .into_iter()
        .next()
        .map(|block| block.text)
        .unwrap_or_default()
}

pub fn known_models() -> Vec<String> {
    KNOWN_MODELS.iter().map(|model| model.to_string()).collect()
}

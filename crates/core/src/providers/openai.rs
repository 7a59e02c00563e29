use serde::{Deserialize, Serialize};

use super::{ChatMessage, GenerateOptions};

pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_MAX_TOKENS: u32 = 8192;

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// Response of `GET /models`.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelEntry {
    pub id: String,
}

pub fn build_chat_request(
    model: &str,
    prompt: &str,
    options: &GenerateOptions,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(prompt)],
        temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
    }
}

/// Content of the first choice, empty when missing.
pub fn response_text(response: ChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .unwrap_or_default()
}

/// Chat model identifiers (those starting with `gpt`).
pub fn model_names(response: ModelsResponse) -> Vec<String> {
    response
        .data
        .into_iter()
        .map(|model| model.id)
        .filter(|id| id.starts_with("gpt"))
        .collect()
}

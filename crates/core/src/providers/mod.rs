//! Provider identifiers and the wire shapes of every generation backend.
//!
//! Each backend module holds the request bodies it sends and the pure
//! functions that pull generated text and model names out of its responses.
//! HTTP calls live in the `docgen` crate.

use serde::{Deserialize, Serialize};

pub mod claude;
pub mod gemini;
pub mod ollama;
pub mod openai;

/// The generation backends docgen knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Ollama,
    Gemini,
    Claude,
    OpenAi,
}

impl ProviderKind {
    /// Every provider, in the order they are listed to users.
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Ollama,
        ProviderKind::Gemini,
        ProviderKind::Claude,
        ProviderKind::OpenAi,
    ];

    /// Identifier accepted on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Claude => "claude",
            ProviderKind::OpenAi => "openai",
        }
    }

    /// Name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "Ollama",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::Claude => "Claude",
            ProviderKind::OpenAi => "OpenAI",
        }
    }

    /// What the user should check when the provider fails its health check.
    pub fn setup_hint(&self) -> &'static str {
        match self {
            ProviderKind::Ollama => "Make sure Ollama is running: ollama serve",
            ProviderKind::Gemini => "Make sure GEMINI_API_KEY is set",
            ProviderKind::Claude => "Make sure ANTHROPIC_API_KEY is set",
            ProviderKind::OpenAi => "Make sure OPENAI_API_KEY is set",
        }
    }

    /// Look up a provider by its command-line identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Comma-separated list of every identifier.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.id())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Per-call generation options. Unset fields fall back to backend defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Overrides the provider's default model for this call.
    pub model: Option<String>,
}

/// A single chat turn, shared by the chat-style backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

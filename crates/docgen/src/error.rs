use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Unknown provider: {name}. Available: {available}")]
    UnknownProvider { name: String, available: String },

    #[error("Provider \"{provider}\" is not available. {hint}")]
    ProviderUnavailable { provider: String, hint: String },

    #[error("{0} is not set")]
    MissingCredential(&'static str),

    #[error("{provider} API error: {status} - {message}")]
    Generation {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("{provider} request failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned an unexpected response: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Source directory not found: {}", .0.display())]
    SourceRootNotFound(PathBuf),
}

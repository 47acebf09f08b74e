//! Error types for model calls.

use thiserror::Error;

/// Result type alias for model operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors that can occur while talking to a model endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The request never produced a response (connection, timeout, TLS).
    #[error("llm call failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("llm http error {status}: {body}")]
    Status { status: u16, body: String },

    /// The body could not be decoded into the expected shape.
    #[error("malformed llm response: {0}")]
    Malformed(String),

    /// The response decoded but carried no completion.
    #[error("llm response missing choices")]
    EmptyResponse,

    /// Resolver settings are unusable.
    #[error("invalid resolver configuration: {0}")]
    Config(String),

    /// I/O error while reading a resolver file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Resolver file is not valid TOML.
    #[error("invalid resolver toml: {0}")]
    Toml(#[from] toml::de::Error),
}

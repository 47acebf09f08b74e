//! Error types for the operations layer.

use std::path::PathBuf;

use autodoc_llm::LlmError;
use thiserror::Error;

/// Result type for operations.
pub type DocResult<T> = Result<T, DocError>;

/// Errors that can occur while documenting a source tree.
#[derive(Debug, Error)]
pub enum DocError {
    /// The directory to document does not exist.
    #[error("No source directory found at {path}")]
    RootNotFound { path: PathBuf },

    /// README generation found nothing to aggregate.
    #[error("No .txt artifacts found in {path}. Run describe and summarize first.")]
    NoArtifacts { path: PathBuf },

    /// The Python source could not be parsed cleanly.
    #[error("Syntax error near line {line}")]
    Syntax { line: usize },

    /// The tree-sitter grammar could not be loaded.
    #[error("Failed to load Python grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    /// A model call failed where no placeholder is acceptable.
    #[error("Model call failed: {0}")]
    Llm(#[from] LlmError),

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Path resolution error.
    #[error("Failed to resolve path {path}: {message}")]
    PathResolution { path: PathBuf, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context.
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl DocError {
    /// Create a new error with additional context.
    pub fn with_context(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a path resolution error.
    pub fn path_resolution(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::PathResolution {
            path: path.into(),
            message: message.into(),
        }
    }
}

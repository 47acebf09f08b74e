//! Where and how to reach a model.

use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use autodoc_core::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

use crate::error::{LlmError, LlmResult};

/// Base URL of a local Ollama daemon.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Base URL of the hosted OpenAI API.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// Wire format spoken by the endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Ollama's native `/api/chat`.
    #[default]
    Ollama,
    /// OpenAI-compatible `/chat/completions`.
    #[serde(alias = "openai-compatible")]
    OpenAi,
}

impl Backend {
    pub fn default_url(&self) -> &'static str {
        match self {
            Backend::Ollama => DEFAULT_OLLAMA_URL,
            Backend::OpenAi => DEFAULT_OPENAI_URL,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Ollama => f.write_str("ollama"),
            Backend::OpenAi => f.write_str("openai"),
        }
    }
}

impl FromStr for Backend {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ollama" => Ok(Backend::Ollama),
            "openai" | "openai-compatible" | "openai_compatible" => Ok(Backend::OpenAi),
            other => Err(LlmError::Config(format!(
                "unknown backend '{other}' (expected ollama or openai)"
            ))),
        }
    }
}

/// Resolver definition for model calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmResolver {
    #[serde(default)]
    pub backend: Backend,
    pub api_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_key: String,
    pub model_name: String,
}

impl Default for LlmResolver {
    fn default() -> Self {
        Self::ollama(DEFAULT_MODEL)
    }
}

impl LlmResolver {
    pub fn new(
        backend: Backend,
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            api_url: api_url.into(),
            api_key: api_key.into(),
            model_name: model_name.into(),
        }
    }

    /// Resolver for a local Ollama daemon.
    pub fn ollama(model_name: impl Into<String>) -> Self {
        Self::new(Backend::Ollama, DEFAULT_OLLAMA_URL, "", model_name)
    }

    /// Resolver for an OpenAI-compatible endpoint.
    pub fn openai(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self::new(Backend::OpenAi, api_url, api_key, model_name)
    }

    /// Replace the model name, keeping the endpoint.
    pub fn with_model(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Default resolver with environment overrides applied.
    pub fn load_from_env() -> LlmResult<Self> {
        Self::default().apply_env()
    }

    /// Apply `AUTODOC_*` (and `OPENAI_*` fallback) environment overrides.
    pub fn apply_env(self) -> LlmResult<Self> {
        self.apply_overrides(|key| env::var(key).ok().filter(|v| !v.trim().is_empty()))
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Switching backends without an explicit URL moves the URL to the new
    /// backend's default.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> LlmResult<Self> {
        if let Some(raw) = lookup("AUTODOC_BACKEND") {
            let backend: Backend = raw.parse()?;
            if backend != self.backend && self.api_url == self.backend.default_url() {
                self.api_url = backend.default_url().to_string();
            }
            self.backend = backend;
        }
        if let Some(url) = lookup("AUTODOC_API_URL").or_else(|| lookup("OPENAI_API_URL")) {
            self.api_url = url;
        }
        if let Some(key) = lookup("AUTODOC_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            self.api_key = key;
        }
        if let Some(model) = lookup("AUTODOC_MODEL").or_else(|| lookup("OPENAI_MODEL_NAME")) {
            self.model_name = model;
        }
        Ok(self)
    }

    /// Load a resolver from a TOML file with a `[resolver]` table.
    pub fn load_from_toml<P: AsRef<Path>>(path: P) -> LlmResult<Self> {
        #[derive(Deserialize)]
        struct ResolverFile {
            resolver: LlmResolver,
        }

        let raw = fs::read_to_string(path.as_ref())?;
        let file: ResolverFile = toml::from_str(&raw)?;
        file.resolver.validate()?;
        Ok(file.resolver)
    }

    /// Reject resolvers that cannot produce a request.
    pub fn validate(&self) -> LlmResult<()> {
        if self.api_url.trim().is_empty() {
            return Err(LlmError::Config("api_url is empty".into()));
        }
        if self.model_name.trim().is_empty() {
            return Err(LlmError::Config("model_name is empty".into()));
        }
        Ok(())
    }

    /// Full URL of the chat endpoint for this backend.
    pub fn endpoint(&self) -> String {
        let base = self.api_url.trim_end_matches('/');
        match self.backend {
            Backend::Ollama => format!("{base}/api/chat"),
            Backend::OpenAi => format!("{base}/chat/completions"),
        }
    }
}

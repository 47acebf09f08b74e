//! Language model client for the autodoc pipeline.
//!
//! The pipeline only talks to a model through [`ModelClient`]: one prompt in,
//! one completion out. [`HttpModelClient`] implements it for two wire formats:
//!
//! - **Ollama** native chat (`POST /api/chat`)
//! - **OpenAI-compatible** chat completions (`POST /chat/completions`), which
//!   also covers vLLM, LM Studio and Ollama's `/v1` shim
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use autodoc_llm::{HttpModelClient, LlmResolver, ModelClient};
//!
//! # async fn demo() -> autodoc_llm::LlmResult<()> {
//! let resolver = LlmResolver::load_from_env()?;
//! let client = HttpModelClient::new(resolver, Duration::from_secs(120))?;
//! let reply = client.complete("Say hello").await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod resolver;

use async_trait::async_trait;

pub use client::HttpModelClient;
pub use error::{LlmError, LlmResult};
pub use resolver::{Backend, LlmResolver, DEFAULT_OLLAMA_URL, DEFAULT_OPENAI_URL};

/// One prompt in, one completion out.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send a single user prompt and return the model's text reply.
    async fn complete(&self, prompt: &str) -> LlmResult<String>;

    /// Name of the model answering the prompts.
    fn model_name(&self) -> &str;
}

//! HTTP implementation of [`ModelClient`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LlmError, LlmResult};
use crate::resolver::{Backend, LlmResolver};
use crate::ModelClient;

/// Model client that posts one chat message per prompt.
#[derive(Debug, Clone)]
pub struct HttpModelClient {
    resolver: LlmResolver,
    client: Client,
}

impl HttpModelClient {
    /// Build a client for `resolver`. Every request is bounded by `timeout`.
    pub fn new(resolver: LlmResolver, timeout: Duration) -> LlmResult<Self> {
        resolver.validate()?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { resolver, client })
    }

    pub fn resolver(&self) -> &LlmResolver {
        &self.resolver
    }

    fn headers(&self) -> LlmResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !self.resolver.api_key.is_empty() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", self.resolver.api_key))
                    .map_err(|_| LlmError::Config("invalid api key header".into()))?,
            );
        }
        Ok(headers)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, body: &B) -> LlmResult<R> {
        let response = self
            .client
            .post(self.resolver.endpoint())
            .headers(self.headers()?)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<R>()
            .await
            .map_err(|err| LlmError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl ModelClient for HttpModelClient {
    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let messages = vec![ChatMessage::user(prompt)];
        let content = match self.resolver.backend {
            Backend::Ollama => {
                let request = OllamaChatRequest {
                    model: &self.resolver.model_name,
                    messages,
                    stream: false,
                };
                let response: OllamaChatResponse = self.post(&request).await?;
                response.message.content
            }
            Backend::OpenAi => {
                let request = OpenAiChatRequest {
                    model: &self.resolver.model_name,
                    messages,
                };
                let response: OpenAiChatResponse = self.post(&request).await?;
                response.into_content()?
            }
        };

        debug!(
            model = %self.resolver.model_name,
            prompt_chars = prompt.len(),
            reply_chars = content.len(),
            "llm response received"
        );
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.resolver.model_name
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl<'a> ChatMessage<'a> {
    fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Serialize)]
struct OpenAiChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<Choice>,
}

impl OpenAiChatResponse {
    fn into_content(self) -> LlmResult<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

//! Scripted model client for pipeline tests.

use std::sync::Mutex;

use async_trait::async_trait;
use autodoc_llm::{LlmError, LlmResult, ModelClient};

enum Reply {
    Text(String),
    Fail,
}

/// Answers prompts by substring match, first matching rule wins.
///
/// Prompts that match no rule fail with an HTTP 500, which is the same path
/// the pipeline takes when the endpoint is down.
pub struct ScriptedClient {
    rules: Vec<(String, Reply)>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn on(mut self, needle: &str, reply: &str) -> Self {
        self.rules
            .push((needle.to_string(), Reply::Text(reply.to_string())));
        self
    }

    pub fn fail_on(mut self, needle: &str) -> Self {
        self.rules.push((needle.to_string(), Reply::Fail));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn count_matching(&self, needle: &str) -> usize {
        self.prompts().iter().filter(|p| p.contains(needle)).count()
    }
}

#[async_trait]
impl ModelClient for ScriptedClient {
    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        for (needle, reply) in &self.rules {
            if prompt.contains(needle.as_str()) {
                return match reply {
                    Reply::Text(text) => Ok(text.clone()),
                    Reply::Fail => Err(LlmError::Status {
                        status: 500,
                        body: "scripted failure".into(),
                    }),
                };
            }
        }

        Err(LlmError::Status {
            status: 500,
            body: "no scripted reply".into(),
        })
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Needles identifying each prompt kind.
pub const CLASSIFY: &str = "determine what commenting style";
pub const COMPARE: &str = "in terms of code commenting verbosity";
pub const STRIP: &str = "existing comments removed";
pub const ADD: &str = "inline comments.";
pub const DOCSTRING: &str = "Google style docstring";
pub const FILE_SUMMARY: &str = "in 1-3 sentences";
pub const FILE_PROCESSES: &str = "Keep track of the order of function calls";
pub const DIRECTORY_SUMMARY: &str = "what the entire directory does";
pub const README: &str = "expert software documentarian";

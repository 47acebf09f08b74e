//! CLI command implementations.

pub mod config;
pub mod run;
pub mod scan;

use anyhow::{Context, Result};
use autodoc_core::CommentStyle;
use autodoc_llm::LlmResolver;
use autodoc_ops::{Config, DocContext, RunRequest};
use serde::Serialize;

use crate::TargetArgs;

/// How results are reported to the user.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl Output {
    /// Human-readable progress, suppressed by `--quiet` and `--json`.
    pub fn human(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Print `value` as pretty JSON when `--json` was given.
    pub fn emit_json<T: Serialize>(&self, value: &T) -> Result<bool> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(self.json)
    }
}

/// A single pipeline stage selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Comment,
    Docstrings,
    Describe,
    Summarize,
    Readme,
}

/// Apply per-invocation model overrides on top of the loaded config.
pub fn apply_overrides(mut config: Config, args: &TargetArgs) -> Result<Config> {
    if let Some(path) = &args.resolver_file {
        config.resolver = LlmResolver::load_from_toml(path)
            .with_context(|| format!("Failed to load resolver file {}", path.display()))?;
    }
    if let Some(model) = &args.model {
        config.resolver.model_name = model.clone();
    }
    Ok(config)
}

/// Build the request for the target directory.
pub fn build_request(args: &TargetArgs) -> RunRequest {
    let mut request = RunRequest::new(&args.directory).with_exclude_dirs(args.exclude_dirs.clone());
    if let Some(style) = &args.commenting_style {
        request = request.with_commenting_style(CommentStyle::new(style));
    }
    request
}

/// Build a context for stages that make no model calls.
///
/// Model overrides are ignored, so a bad `--resolver-file` cannot fail a scan.
pub fn offline_context(config: Config) -> DocContext {
    DocContext::offline(config)
}

/// Build a context with the HTTP model client.
pub fn build_context(config: Config, args: &TargetArgs) -> Result<DocContext> {
    let config = apply_overrides(config, args)?;
    DocContext::from_config(config).context("Failed to set up the model client")
}

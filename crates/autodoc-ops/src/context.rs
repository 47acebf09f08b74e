//! DocContext - the service that runs the documentation pipeline.
//!
//! The context holds configuration and a model client and exposes one method
//! per stage plus [`DocContext::run`] for the whole pipeline. Stages run
//! sequentially; a file that fails is logged and recorded, and the run moves
//! on to the next one.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use autodoc_core::CommentStyle;
use autodoc_llm::{HttpModelClient, ModelClient};
use tracing::{info, warn};

use crate::config::{validate_output_dir, Config};
use crate::describe::{write_directory_structure, DescribeOptions};
use crate::discover::discover_python_files;
use crate::docstring::document_file;
use crate::error::{DocError, DocResult};
use crate::normalize::normalize_file;
use crate::readme::generate_readme;
use crate::requests::RunRequest;
use crate::responses::*;
use crate::summarize::summarize_directory;

/// The main documentation context.
///
/// Cheap to clone; the model client is shared. A context built with
/// [`DocContext::offline`] has no client and only serves the stages that make
/// no model calls (`discover`, `scan`, `describe`).
#[derive(Clone)]
pub struct DocContext {
    /// Configuration for every stage.
    pub config: Config,
    client: Option<Arc<dyn ModelClient>>,
}

impl fmt::Debug for DocContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocContext")
            .field("config", &self.config)
            .field("model", &self.model_name())
            .finish()
    }
}

impl DocContext {
    /// Create a context around an existing client.
    pub fn new(config: Config, client: Arc<dyn ModelClient>) -> Self {
        Self {
            config,
            client: Some(client),
        }
    }

    /// Create a context without a model client.
    pub fn offline(config: Config) -> Self {
        Self {
            config,
            client: None,
        }
    }

    /// Create a context with an HTTP client built from the configured resolver.
    pub fn from_config(config: Config) -> DocResult<Self> {
        let client = HttpModelClient::new(config.resolver.clone(), config.request_timeout())?;
        Ok(Self::new(config, Arc::new(client)))
    }

    /// The model client, or a config error for an offline context.
    pub fn client(&self) -> DocResult<&dyn ModelClient> {
        self.client
            .as_deref()
            .ok_or_else(|| DocError::Config("no model client configured".into()))
    }

    /// Name of the model answering prompts.
    pub fn model_name(&self) -> &str {
        match &self.client {
            Some(client) => client.model_name(),
            None => &self.config.resolver.model_name,
        }
    }

    fn output_root(&self, request: &RunRequest) -> DocResult<PathBuf> {
        validate_output_dir(&self.config.output_dir_name)?;
        Ok(self.config.output_root(&request.root))
    }

    fn exclude_dirs(&self, request: &RunRequest) -> Vec<String> {
        self.config.excluded_dirs(&request.exclude_dirs)
    }

    fn target_style(&self, request: &RunRequest) -> CommentStyle {
        request
            .commenting_style
            .clone()
            .unwrap_or_else(|| self.config.commenting_style.clone())
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    /// Python files under the request root.
    pub fn discover(&self, request: &RunRequest) -> DocResult<Vec<PathBuf>> {
        discover_python_files(&request.root, &self.exclude_dirs(request))
    }

    /// Discovery with file sizes. Makes no model calls.
    pub fn scan(&self, request: &RunRequest) -> DocResult<ScanResponse> {
        let exclude_dirs = self.exclude_dirs(request);
        let files = discover_python_files(&request.root, &exclude_dirs)?
            .into_iter()
            .map(|path| {
                let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
                ScannedFile { path, size }
            })
            .collect();

        Ok(ScanResponse {
            root: request.root.clone(),
            exclude_dirs,
            files,
        })
    }

    // =========================================================================
    // Stages
    // =========================================================================

    /// Normalize comments of every source file into the output root.
    pub async fn comment(&self, request: &RunRequest) -> DocResult<CommentResponse> {
        let client = self.client()?;
        let output_root = self.output_root(request)?;
        let target = self.target_style(request);
        let files = self.discover(request)?;
        std::fs::create_dir_all(&output_root)?;

        info!(
            root = %request.root.display(),
            files = files.len(),
            style = %target,
            "normalizing comments"
        );

        let mut outcomes = Vec::with_capacity(files.len());
        let mut failures = Vec::new();
        for file in &files {
            match normalize_file(client, &request.root, file, &output_root, &target).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    warn!(file = %file.display(), "skipping file: {err}");
                    failures.push(StageFailure::new(file, err));
                }
            }
        }

        Ok(CommentResponse {
            output_root,
            outcomes,
            failures,
        })
    }

    /// Insert docstrings into every Python file of the output root.
    pub async fn docstrings(&self, request: &RunRequest) -> DocResult<DocstringResponse> {
        let client = self.client()?;
        let output_root = self.output_root(request)?;
        let files = discover_python_files(&output_root, &self.exclude_dirs(request))?;
        info!(root = %output_root.display(), files = files.len(), "inserting docstrings");

        let mut outcomes = Vec::with_capacity(files.len());
        let mut failures = Vec::new();
        for file in &files {
            match document_file(client, file).await {
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => {
                    warn!(file = %file.display(), "skipping file: {err}");
                    failures.push(StageFailure::new(file, err));
                }
            }
        }

        Ok(DocstringResponse { outcomes, failures })
    }

    /// Write the directory structure of the source root.
    pub fn describe(&self, request: &RunRequest) -> DocResult<DescribeResponse> {
        let options = DescribeOptions {
            exclude_dirs: self.exclude_dirs(request),
            max_depth: self.config.max_depth,
            show_file_preview: self.config.show_file_preview,
            preview_lines: self.config.preview_lines,
        };
        let path = write_directory_structure(&request.root, &self.output_root(request)?, &options)?;
        let entries = std::fs::read_to_string(&path)?.lines().skip(1).count();
        Ok(DescribeResponse { path, entries })
    }

    /// Summarize the files of the output root.
    pub async fn summarize(&self, request: &RunRequest) -> DocResult<SummarizeResponse> {
        let client = self.client()?;
        let output_root = self.require_output_root(request)?;
        let outcome = summarize_directory(
            client,
            &output_root,
            &self.exclude_dirs(request),
            self.config.summary_char_limit,
        )
        .await?;
        Ok(SummarizeResponse { outcome })
    }

    /// Generate `README.md` from the text artifacts of the output root.
    pub async fn readme(&self, request: &RunRequest) -> DocResult<ReadmeResponse> {
        let client = self.client()?;
        let output_root = self.require_output_root(request)?;
        let outcome = generate_readme(client, &output_root).await?;
        Ok(ReadmeResponse { outcome })
    }

    fn require_output_root(&self, request: &RunRequest) -> DocResult<PathBuf> {
        let output_root = self.output_root(request)?;
        if !output_root.is_dir() {
            return Err(DocError::RootNotFound { path: output_root });
        }
        Ok(output_root)
    }

    // =========================================================================
    // Pipeline
    // =========================================================================

    /// Run every stage in order against `request.root`.
    pub async fn run(&self, request: RunRequest) -> DocResult<RunResponse> {
        ensure_root(&request.root)?;
        info!(
            root = %request.root.display(),
            model = self.model_name(),
            "documenting source tree"
        );

        let comment = self.comment(&request).await?;
        let docstrings = self.docstrings(&request).await?;
        let describe = self.describe(&request)?;
        let summarize = self.summarize(&request).await?;
        let readme = self.readme(&request).await?;

        info!(
            root = %request.root.display(),
            files = comment.outcomes.len(),
            failures = comment.failures.len() + docstrings.failures.len(),
            "documentation complete"
        );

        Ok(RunResponse {
            root: request.root.clone(),
            output_root: comment.output_root.clone(),
            model: self.model_name().to_string(),
            comment,
            docstrings,
            describe,
            summarize,
            readme,
        })
    }
}

fn ensure_root(root: &Path) -> DocResult<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(DocError::RootNotFound {
            path: root.to_path_buf(),
        })
    }
}

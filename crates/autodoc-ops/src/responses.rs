//! Response DTOs for operations.
//!
//! Each response carries everything a stage produced so the CLI can print a
//! summary or dump it as JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::docstring::DocstringOutcome;
use crate::normalize::{NormalizeAction, NormalizeOutcome};
use crate::readme::ReadmeOutcome;
use crate::summarize::SummaryOutcome;

/// A file a stage gave up on. The run continues past it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageFailure {
    pub path: PathBuf,
    pub message: String,
}

impl StageFailure {
    pub fn new(path: &Path, message: impl ToString) -> Self {
        Self {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

/// A discovered file and its size on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub size: u64,
}

/// Response from a scan (discovery only, no model calls).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub root: PathBuf,
    pub exclude_dirs: Vec<String>,
    pub files: Vec<ScannedFile>,
}

impl ScanResponse {
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

/// Response from comment normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    /// Where the normalized copies were written.
    pub output_root: PathBuf,
    pub outcomes: Vec<NormalizeOutcome>,
    pub failures: Vec<StageFailure>,
}

impl CommentResponse {
    /// Count files that ended with the given action.
    pub fn count(&self, action: NormalizeAction) -> usize {
        self.outcomes.iter().filter(|o| o.action == action).count()
    }
}

/// Response from docstring insertion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocstringResponse {
    pub outcomes: Vec<DocstringOutcome>,
    pub failures: Vec<StageFailure>,
}

impl DocstringResponse {
    /// Total functions that received a docstring or placeholder.
    pub fn functions_documented(&self) -> usize {
        self.outcomes.iter().map(|o| o.functions.len()).sum()
    }

    pub fn placeholders(&self) -> usize {
        self.outcomes.iter().map(|o| o.placeholders).sum()
    }
}

/// Response from describing the directory tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeResponse {
    pub path: PathBuf,
    /// Number of entry lines, header excluded.
    pub entries: usize,
}

/// Response from summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    #[serde(flatten)]
    pub outcome: SummaryOutcome,
}

/// Response from README generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeResponse {
    #[serde(flatten)]
    pub outcome: ReadmeOutcome,
}

/// Response from a full pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    pub root: PathBuf,
    pub output_root: PathBuf,
    pub model: String,
    pub comment: CommentResponse,
    pub docstrings: DocstringResponse,
    pub describe: DescribeResponse,
    pub summarize: SummarizeResponse,
    pub readme: ReadmeResponse,
}

impl RunResponse {
    /// Every artifact the run wrote, in generation order.
    pub fn artifacts(&self) -> Vec<&Path> {
        vec![
            self.describe.path.as_path(),
            self.summarize.outcome.directory_summary_path.as_path(),
            self.summarize.outcome.job_summaries_path.as_path(),
            self.readme.outcome.path.as_path(),
        ]
    }

    /// Files skipped by any stage.
    pub fn failure_count(&self) -> usize {
        self.comment.failures.len() + self.docstrings.failures.len()
    }
}

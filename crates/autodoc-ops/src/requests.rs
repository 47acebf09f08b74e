//! Request DTOs for operations.
//!
//! Every stage takes the same request: the source root plus per-run
//! overrides. Stages that work on the output tree derive it from the root.

use std::path::PathBuf;

use autodoc_core::CommentStyle;
use serde::{Deserialize, Serialize};

/// Request to document a source tree, in full or one stage at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    /// Directory containing the Python sources.
    pub root: PathBuf,

    /// Directory names to skip, on top of the configured ones.
    #[serde(default)]
    pub exclude_dirs: Vec<String>,

    /// Target comment style; falls back to the configured style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commenting_style: Option<CommentStyle>,
}

impl RunRequest {
    /// Create a request for a source root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude_dirs: vec![],
            commenting_style: None,
        }
    }

    /// Skip additional directory names.
    pub fn with_exclude_dirs(mut self, dirs: Vec<String>) -> Self {
        self.exclude_dirs = dirs;
        self
    }

    /// Override the target comment style.
    pub fn with_commenting_style(mut self, style: CommentStyle) -> Self {
        self.commenting_style = Some(style);
        self
    }
}

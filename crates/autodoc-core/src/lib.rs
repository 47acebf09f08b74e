//! Core domain types shared across the autodoc workspace.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod text;

/// Default model requested from the endpoint.
pub const DEFAULT_MODEL: &str = "llama3.1:8b";

/// Name of the mirrored output directory created under the source root.
pub const DEFAULT_OUTPUT_DIR: &str = "auto_docu_output";

/// Directory names skipped by discovery unless the caller overrides them.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["__pycache__", "venv", ".git"];

/// Docstring spliced in when generation fails for a function.
pub const DOCSTRING_PLACEHOLDER: &str = "\"\"\"TODO: Add docstring\"\"\"";

// =============================================================================
// Comment Styles
// =============================================================================

/// Free-text label describing how verbose the comments in a file are.
///
/// Labels come from two places: the user (`minimal`, `moderate`, `verbose`,
/// ...) and the model's classification of an existing file. Both are
/// normalized the same way so they can be compared in a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentStyle(String);

impl CommentStyle {
    /// Normalize a raw label: drop the word "commenting", trim, lowercase.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let cleaned = raw
            .as_ref()
            .replace("commenting", "")
            .replace("Commenting", "")
            .trim()
            .trim_matches(|c: char| c == '.' || c == '"' || c == '\'')
            .trim()
            .to_lowercase();

        if cleaned.is_empty() {
            Self::unknown()
        } else {
            Self(cleaned)
        }
    }

    /// Label used when the model could not classify a file.
    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == "unknown"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CommentStyle {
    fn default() -> Self {
        Self("moderate".to_string())
    }
}

impl fmt::Display for CommentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CommentStyle {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// How far a file's detected comment style is from the requested one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleVerdict {
    VeryDifferent,
    Different,
    Similar,
    VerySimilar,
    /// The reply matched none of the expected phrases, or the call failed.
    Unknown,
}

impl StyleVerdict {
    /// Parse the model's free-text comparison reply.
    pub fn parse(reply: &str) -> Self {
        let reply = reply.to_lowercase();
        if reply.contains("very different") {
            Self::VeryDifferent
        } else if reply.contains("different") {
            Self::Different
        } else if reply.contains("very similar") {
            Self::VerySimilar
        } else if reply.contains("similar") {
            Self::Similar
        } else {
            Self::Unknown
        }
    }

    /// Whether the file's comments must be rewritten in the target style.
    pub fn needs_rewrite(&self) -> bool {
        matches!(self, Self::VeryDifferent | Self::Different)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryDifferent => "very different",
            Self::Different => "different",
            Self::Similar => "similar",
            Self::VerySimilar => "very similar",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StyleVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Function Records
// =============================================================================

/// A function definition that has no docstring yet.
///
/// Line numbers are 1-based. `body_line` is the line of the first statement
/// of the body, which is where the docstring gets spliced in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub body_line: usize,
    /// Leading whitespace of the body line, reused for the docstring.
    pub indent: String,
    /// Source text of the whole definition.
    pub source: String,
}

// =============================================================================
// Artifacts
// =============================================================================

/// Text artifacts written into the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Artifact {
    DirectoryStructure,
    DirectorySummary,
    JobSummaries,
    Readme,
}

impl Artifact {
    pub const ALL: [Artifact; 4] = [
        Artifact::DirectoryStructure,
        Artifact::DirectorySummary,
        Artifact::JobSummaries,
        Artifact::Readme,
    ];

    /// File name of the artifact inside the output root.
    pub fn file_name(&self) -> &'static str {
        match self {
            Artifact::DirectoryStructure => "README_1_directory_structure.txt",
            Artifact::DirectorySummary => "README_2_directory_summary.txt",
            Artifact::JobSummaries => "README_3_job_summaries.txt",
            Artifact::Readme => "README.md",
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_style_strips_commenting_word() {
        assert_eq!(CommentStyle::new("moderate commenting").as_str(), "moderate");
        assert_eq!(CommentStyle::new("  Extensive Commenting.\n").as_str(), "extensive");
        assert_eq!(CommentStyle::new("light").as_str(), "light");
    }

    #[test]
    fn empty_comment_style_is_unknown() {
        assert!(CommentStyle::new("commenting").is_unknown());
        assert!(CommentStyle::new("   ").is_unknown());
        assert_eq!(CommentStyle::default().as_str(), "moderate");
    }

    #[test]
    fn verdict_parsing_prefers_the_longer_phrase() {
        assert_eq!(StyleVerdict::parse("Very different."), StyleVerdict::VeryDifferent);
        assert_eq!(StyleVerdict::parse("different"), StyleVerdict::Different);
        assert_eq!(StyleVerdict::parse("VERY SIMILAR"), StyleVerdict::VerySimilar);
        assert_eq!(StyleVerdict::parse("similar"), StyleVerdict::Similar);
        assert_eq!(StyleVerdict::parse("no idea"), StyleVerdict::Unknown);
    }

    #[test]
    fn only_different_verdicts_need_rewrite() {
        assert!(StyleVerdict::VeryDifferent.needs_rewrite());
        assert!(StyleVerdict::Different.needs_rewrite());
        assert!(!StyleVerdict::Similar.needs_rewrite());
        assert!(!StyleVerdict::VerySimilar.needs_rewrite());
        assert!(!StyleVerdict::Unknown.needs_rewrite());
    }

    #[test]
    fn artifact_names_sort_in_readme_order() {
        let mut txt: Vec<_> = Artifact::ALL
            .iter()
            .map(|a| a.file_name())
            .filter(|n| n.ends_with(".txt"))
            .collect();
        txt.sort();
        assert_eq!(
            txt,
            vec![
                "README_1_directory_structure.txt",
                "README_2_directory_summary.txt",
                "README_3_job_summaries.txt",
            ]
        );
    }
}

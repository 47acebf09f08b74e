//! Autodoc Operations Layer
//!
//! This crate runs the documentation pipeline for a Python source tree:
//! discovery, comment normalization, docstring insertion, the directory
//! structure, per-file and directory summaries, and finally a README.
//!
//! ## Architecture
//!
//! - **Stages**: free functions per module, each taking a [`autodoc_llm::ModelClient`]
//! - **Requests / Responses**: serde DTOs shared by the CLI and library users
//! - **DocContext**: the service that wires configuration, client and stages
//!
//! ## Usage
//!
//! ```rust,no_run
//! use autodoc_ops::{Config, DocContext, RunRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let ctx = DocContext::from_config(Config::load()?)?;
//!
//!     let response = ctx.run(RunRequest::new("./my_project")).await?;
//!
//!     println!("README written to {}", response.readme.outcome.path.display());
//!     Ok(())
//! }
//! ```

mod config;
mod context;
mod describe;
mod discover;
mod docstring;
mod error;
mod normalize;
pub mod prompts;
mod readme;
mod requests;
mod responses;
mod summarize;

#[cfg(test)]
mod test_support;

pub use config::{Config, CONFIG_KEYS};
pub use context::DocContext;
pub use describe::{describe_directory, write_directory_structure, DescribeOptions};
pub use discover::{discover_python_files, display_relative, mirror_path};
pub use docstring::{
    document_file, extract_functions_missing_docstrings, insert_docstrings, suggest_docstring,
    DocstringOutcome,
};
pub use error::{DocError, DocResult};
pub use normalize::{normalize_file, NormalizeAction, NormalizeOutcome};
pub use readme::{collect_text_artifacts, generate_readme, ReadmeOutcome};
pub use requests::*;
pub use responses::*;
pub use summarize::{summarize_directory, summarize_file, FileSummary, SummaryOutcome};

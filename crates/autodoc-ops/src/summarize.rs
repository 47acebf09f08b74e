//! Per-file summaries and the holistic directory summary.

use std::path::{Path, PathBuf};

use autodoc_core::text::truncate_chars;
use autodoc_core::Artifact;
use autodoc_llm::ModelClient;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::discover::{discover_python_files, display_relative};
use crate::error::DocResult;
use crate::prompts;

/// Summary of one file, or the reason it has none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    /// Path relative to the summarized root, forward slashes.
    pub path: String,
    pub summary: Option<String>,
    pub processes: Option<String>,
    pub error: Option<String>,
}

impl FileSummary {
    /// Entry as it appears in the job summaries report.
    pub fn render(&self) -> String {
        match (&self.error, &self.summary, &self.processes) {
            (None, Some(summary), Some(processes)) => format!(
                "### {}\nfile_summary: {summary}\nfile_processes: {processes}\n\n",
                self.path
            ),
            (error, _, _) => format!(
                "### {}\n[Error reading or summarizing file: {}]\n\n",
                self.path,
                error.as_deref().unwrap_or("missing summary")
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Result of summarizing a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryOutcome {
    pub files: Vec<FileSummary>,
    pub job_summaries_path: PathBuf,
    pub directory_summary_path: PathBuf,
    pub directory_summary: String,
    /// The directory summary is the error placeholder.
    pub directory_summary_failed: bool,
}

/// Summarize one file from its first `char_limit` characters.
pub async fn summarize_file(
    client: &dyn ModelClient,
    root: &Path,
    file: &Path,
    char_limit: usize,
) -> FileSummary {
    let path = display_relative(root, file);
    match summarize_text(client, file, char_limit).await {
        Ok((summary, processes)) => FileSummary {
            path,
            summary: Some(summary),
            processes: Some(processes),
            error: None,
        },
        Err(err) => {
            warn!(file = %file.display(), "summary failed: {err}");
            FileSummary {
                path,
                summary: None,
                processes: None,
                error: Some(err.to_string()),
            }
        }
    }
}

async fn summarize_text(
    client: &dyn ModelClient,
    file: &Path,
    char_limit: usize,
) -> DocResult<(String, String)> {
    let code = std::fs::read_to_string(file)?;
    let code = truncate_chars(&code, char_limit);

    let summary = client.complete(&prompts::file_summary(code)).await?;
    let processes = client.complete(&prompts::file_processes(code)).await?;
    Ok((summary.trim().to_string(), processes.trim().to_string()))
}

/// Summarize every Python file under `root` and then the directory as a whole.
///
/// Writes the job summaries report and the directory summary into `root`.
/// Per-file and directory-level model failures become placeholder text; only
/// discovery and file writes can fail the call.
pub async fn summarize_directory(
    client: &dyn ModelClient,
    root: &Path,
    exclude_dirs: &[String],
    char_limit: usize,
) -> DocResult<SummaryOutcome> {
    let files = discover_python_files(root, exclude_dirs)?;
    info!(root = %root.display(), files = files.len(), "summarizing files");

    let mut summaries = Vec::with_capacity(files.len());
    for file in &files {
        summaries.push(summarize_file(client, root, file, char_limit).await);
    }

    let mut report = String::from("# Codebase Summary\n\n");
    for summary in &summaries {
        report.push_str(&summary.render());
    }
    let job_summaries_path = root.join(Artifact::JobSummaries.file_name());
    std::fs::write(&job_summaries_path, &report)?;

    let (directory_summary, directory_summary_failed) =
        match client.complete(&prompts::directory_summary(&report)).await {
            Ok(reply) => (reply.trim().to_string(), false),
            Err(err) => {
                warn!(root = %root.display(), "directory summary failed: {err}");
                (
                    format!("###\n[Error reading or summarizing directory: {err}]\n\n"),
                    true,
                )
            }
        };

    let directory_summary_path = root.join(Artifact::DirectorySummary.file_name());
    std::fs::write(
        &directory_summary_path,
        format!("# Directory Summary\n\n{directory_summary}"),
    )?;

    info!(
        root = %root.display(),
        files = summaries.len(),
        failed = summaries.iter().filter(|s| s.is_error()).count(),
        "summaries written"
    );

    Ok(SummaryOutcome {
        files: summaries,
        job_summaries_path,
        directory_summary_path,
        directory_summary,
        directory_summary_failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedClient, DIRECTORY_SUMMARY, FILE_PROCESSES, FILE_SUMMARY};
    use std::fs;
    use tempfile::TempDir;

    fn output_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("pkg")).unwrap();
        fs::write(root.join("main.py"), "import pkg.util\n").unwrap();
        fs::write(root.join("pkg").join("util.py"), "def helper():\n    return 1\n").unwrap();
        temp
    }

    #[tokio::test]
    async fn writes_report_and_directory_summary() {
        let temp = output_tree();
        let client = ScriptedClient::new()
            .on(FILE_SUMMARY, "  Does a thing.\n")
            .on(FILE_PROCESSES, "Calls helper.")
            .on(DIRECTORY_SUMMARY, "A tiny package.\n");

        let outcome = summarize_directory(&client, temp.path(), &[], 2000)
            .await
            .unwrap();

        assert_eq!(outcome.files.len(), 2);
        assert!(!outcome.directory_summary_failed);

        let report = fs::read_to_string(&outcome.job_summaries_path).unwrap();
        assert_eq!(
            report,
            "# Codebase Summary\n\n\
### main.py\nfile_summary: Does a thing.\nfile_processes: Calls helper.\n\n\
### pkg/util.py\nfile_summary: Does a thing.\nfile_processes: Calls helper.\n\n"
        );

        let directory = fs::read_to_string(&outcome.directory_summary_path).unwrap();
        assert_eq!(directory, "# Directory Summary\n\nA tiny package.");

        let prompts = client.prompts();
        let last = prompts.last().unwrap();
        assert!(last.contains(DIRECTORY_SUMMARY));
        assert!(last.contains("### pkg/util.py"));
    }

    #[tokio::test]
    async fn file_failures_become_error_entries() {
        let temp = output_tree();
        let client = ScriptedClient::new()
            .on(FILE_SUMMARY, "Summary.")
            .fail_on(FILE_PROCESSES)
            .fail_on(DIRECTORY_SUMMARY);

        let outcome = summarize_directory(&client, temp.path(), &[], 2000)
            .await
            .unwrap();

        assert!(outcome.files.iter().all(FileSummary::is_error));
        let report = fs::read_to_string(&outcome.job_summaries_path).unwrap();
        assert!(report.contains("### main.py\n[Error reading or summarizing file: "));

        assert!(outcome.directory_summary_failed);
        let directory = fs::read_to_string(&outcome.directory_summary_path).unwrap();
        assert!(directory.starts_with(
            "# Directory Summary\n\n###\n[Error reading or summarizing directory: "
        ));
        assert!(directory.ends_with("]\n\n"));
    }

    #[tokio::test]
    async fn file_content_is_truncated() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("long.py"), "x".repeat(50)).unwrap();
        let client = ScriptedClient::new()
            .on(FILE_SUMMARY, "s")
            .on(FILE_PROCESSES, "p");

        let summary = summarize_file(&client, temp.path(), &temp.path().join("long.py"), 10).await;

        assert_eq!(summary.summary.as_deref(), Some("s"));
        let prompt = &client.prompts()[0];
        assert!(prompt.contains(&format!("{}\n", "x".repeat(10))));
        assert!(!prompt.contains(&"x".repeat(11)));
    }
}

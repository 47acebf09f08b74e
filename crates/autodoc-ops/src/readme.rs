//! README generation from the text artifacts in the output root.

use std::path::{Path, PathBuf};

use autodoc_core::Artifact;
use autodoc_llm::ModelClient;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DocError, DocResult};
use crate::prompts;

/// Result of generating the README.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadmeOutcome {
    pub path: PathBuf,
    /// Text artifacts the README was built from, in prompt order.
    pub sources: Vec<PathBuf>,
    pub bytes: usize,
}

/// `*.txt` files directly inside `dir`, sorted by name.
pub fn collect_text_artifacts(dir: &Path) -> DocResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Build `README.md` in `output_root` from its text artifacts.
///
/// Fails with [`DocError::NoArtifacts`] when there is nothing to describe, and
/// propagates model errors instead of writing a placeholder.
pub async fn generate_readme(
    client: &dyn ModelClient,
    output_root: &Path,
) -> DocResult<ReadmeOutcome> {
    let sources = collect_text_artifacts(output_root)?;
    if sources.is_empty() {
        return Err(DocError::NoArtifacts {
            path: output_root.to_path_buf(),
        });
    }

    let contents = sources
        .iter()
        .map(std::fs::read_to_string)
        .collect::<Result<Vec<_>, _>>()?;
    let descriptions = contents.join("\n\n");

    let reply = client.complete(&prompts::readme(&descriptions)).await?;
    let readme = reply.trim();

    let path = output_root.join(Artifact::Readme.file_name());
    std::fs::write(&path, readme)?;
    info!(path = %path.display(), sources = sources.len(), "README generated");

    Ok(ReadmeOutcome {
        path,
        sources,
        bytes: readme.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedClient, README};
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn joins_text_artifacts_in_name_order() {
        let temp = TempDir::new().unwrap();
        let out = temp.path();
        fs::write(out.join("README_2_directory_summary.txt"), "second").unwrap();
        fs::write(out.join("README_1_directory_structure.txt"), "first").unwrap();
        fs::write(out.join("notes.md"), "ignored").unwrap();
        fs::create_dir_all(out.join("sub")).unwrap();
        fs::write(out.join("sub").join("nested.txt"), "ignored").unwrap();

        let client = ScriptedClient::new().on(README, "\n# Project\n\nHello.\n\n");
        let outcome = generate_readme(&client, out).await.unwrap();

        assert_eq!(outcome.sources.len(), 2);
        assert_eq!(fs::read_to_string(&outcome.path).unwrap(), "# Project\n\nHello.");
        assert_eq!(outcome.path, out.join("README.md"));

        let prompt = &client.prompts()[0];
        assert!(prompt.contains("Descriptions:\nfirst\n\nsecond\n"));
        assert!(!prompt.contains("ignored"));
    }

    #[tokio::test]
    async fn no_text_files_is_an_error() {
        let temp = TempDir::new().unwrap();
        let client = ScriptedClient::new();

        let err = generate_readme(&client, temp.path()).await.unwrap_err();
        assert!(matches!(err, DocError::NoArtifacts { .. }));
        assert!(client.prompts().is_empty());
    }

    #[tokio::test]
    async fn model_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "text").unwrap();
        let client = ScriptedClient::new().fail_on(README);

        let err = generate_readme(&client, temp.path()).await.unwrap_err();
        assert!(matches!(err, DocError::Llm(_)));
        assert!(!temp.path().join("README.md").exists());
    }
}

//! Comment-style normalization.
//!
//! The model judges the current comment verbosity of a file, compares it to
//! the requested style, and only when they differ rewrites the comments in two
//! passes: strip everything, then comment again in the target style. Every
//! file ends up in the mirrored output tree, rewritten or not.

use std::path::{Path, PathBuf};

use autodoc_core::text::strip_code_fence;
use autodoc_core::{CommentStyle, StyleVerdict};
use autodoc_llm::ModelClient;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::discover::mirror_path;
use crate::error::DocResult;
use crate::prompts;

/// What happened to a file during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeAction {
    /// Style already close enough; copied unchanged.
    Copied,
    /// Comments stripped and re-added in the target style.
    Rewritten,
    /// A rewrite was needed but a model call failed; copied unchanged.
    FellBack,
}

/// Result of normalizing one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeOutcome {
    pub source: PathBuf,
    pub output: PathBuf,
    pub detected_style: CommentStyle,
    pub verdict: StyleVerdict,
    pub action: NormalizeAction,
}

/// Normalize the comments of `file` and write the result under `output_root`.
pub async fn normalize_file(
    client: &dyn ModelClient,
    root: &Path,
    file: &Path,
    output_root: &Path,
    target: &CommentStyle,
) -> DocResult<NormalizeOutcome> {
    let original = std::fs::read_to_string(file)?;
    let output = mirror_path(root, file, output_root)?;

    let detected_style = match client.complete(&prompts::classify_comment_style(&original)).await {
        Ok(reply) => CommentStyle::new(reply),
        Err(err) => {
            warn!(file = %file.display(), "failed to classify comment style: {err}");
            CommentStyle::unknown()
        }
    };

    let verdict = match client
        .complete(&prompts::compare_comment_styles(&detected_style, target))
        .await
    {
        Ok(reply) => StyleVerdict::parse(&reply),
        Err(err) => {
            warn!(file = %file.display(), "failed to compare comment styles: {err}");
            StyleVerdict::Unknown
        }
    };

    info!(
        file = %file.display(),
        detected = %detected_style,
        target = %target,
        verdict = %verdict,
        "comment style checked"
    );

    if !verdict.needs_rewrite() {
        std::fs::write(&output, &original)?;
        return Ok(NormalizeOutcome {
            source: file.to_path_buf(),
            output,
            detected_style,
            verdict,
            action: NormalizeAction::Copied,
        });
    }

    let action = match rewrite_comments(client, &original, &output, target).await {
        Ok(()) => NormalizeAction::Rewritten,
        Err(err) => {
            warn!(file = %file.display(), "comment rewrite failed, keeping original: {err}");
            std::fs::write(&output, &original)?;
            NormalizeAction::FellBack
        }
    };

    Ok(NormalizeOutcome {
        source: file.to_path_buf(),
        output,
        detected_style,
        verdict,
        action,
    })
}

/// Strip then re-add comments. The stripped version is written to `output`
/// between the two passes.
async fn rewrite_comments(
    client: &dyn ModelClient,
    original: &str,
    output: &Path,
    target: &CommentStyle,
) -> DocResult<()> {
    let stripped = strip_code_fence(&client.complete(&prompts::strip_comments(original)).await?);
    std::fs::write(output, &stripped)?;
    info!(file = %output.display(), "original comments removed");

    let commented =
        strip_code_fence(&client.complete(&prompts::add_comments(&stripped, target)).await?);
    std::fs::write(output, &commented)?;
    info!(file = %output.display(), style = %target, "new comments added");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedClient, ADD, CLASSIFY, COMPARE, STRIP};
    use std::fs;
    use tempfile::TempDir;

    const SOURCE: &str = "# add things\n# really, add them\ndef add(a, b):\n    # sum\n    return a + b\n";

    fn setup() -> (TempDir, PathBuf, PathBuf, PathBuf) {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        let file = root.join("pkg").join("math.py");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, SOURCE).unwrap();
        let output_root = root.join("auto_docu_output");
        (temp, root, file, output_root)
    }

    #[tokio::test]
    async fn similar_style_copies_file_unchanged() {
        let (_temp, root, file, output_root) = setup();
        let client = ScriptedClient::new()
            .on(CLASSIFY, "moderate commenting")
            .on(COMPARE, "Very similar");

        let outcome = normalize_file(&client, &root, &file, &output_root, &CommentStyle::default())
            .await
            .unwrap();

        assert_eq!(outcome.action, NormalizeAction::Copied);
        assert_eq!(outcome.detected_style.as_str(), "moderate");
        assert_eq!(outcome.output, output_root.join("pkg").join("math.py"));
        assert_eq!(fs::read_to_string(&outcome.output).unwrap(), SOURCE);
        assert_eq!(client.count_matching(STRIP), 0);
    }

    #[tokio::test]
    async fn different_style_strips_then_recomments() {
        let (_temp, root, file, output_root) = setup();
        let client = ScriptedClient::new()
            .on(CLASSIFY, "extensive")
            .on(COMPARE, "different")
            .on(STRIP, "```python\ndef add(a, b):\n    return a + b\n```")
            .on(ADD, "```python\ndef add(a, b):\n    return a + b  # sum\n```");

        let outcome = normalize_file(
            &client,
            &root,
            &file,
            &output_root,
            &CommentStyle::new("minimal"),
        )
        .await
        .unwrap();

        assert_eq!(outcome.action, NormalizeAction::Rewritten);
        assert_eq!(outcome.verdict, StyleVerdict::Different);
        assert_eq!(
            fs::read_to_string(&outcome.output).unwrap(),
            "def add(a, b):\n    return a + b  # sum\n"
        );

        let add_prompt = client
            .prompts()
            .into_iter()
            .find(|p| p.contains(ADD))
            .unwrap();
        assert!(add_prompt.contains("with minimal inline comments"));
        assert!(!add_prompt.contains("# add things"), "re-add works on stripped code");
    }

    #[tokio::test]
    async fn failed_classification_compares_unknown_style() {
        let (_temp, root, file, output_root) = setup();
        let client = ScriptedClient::new()
            .fail_on(CLASSIFY)
            .on(COMPARE, "similar");

        let outcome = normalize_file(&client, &root, &file, &output_root, &CommentStyle::default())
            .await
            .unwrap();

        assert!(outcome.detected_style.is_unknown());
        assert!(client
            .prompts()
            .iter()
            .any(|p| p.contains(COMPARE) && p.contains("'unknown'")));
        assert_eq!(outcome.action, NormalizeAction::Copied);
    }

    #[tokio::test]
    async fn failed_comparison_means_no_rewrite() {
        let (_temp, root, file, output_root) = setup();
        let client = ScriptedClient::new()
            .on(CLASSIFY, "extensive")
            .fail_on(COMPARE);

        let outcome = normalize_file(&client, &root, &file, &output_root, &CommentStyle::default())
            .await
            .unwrap();

        assert_eq!(outcome.verdict, StyleVerdict::Unknown);
        assert_eq!(outcome.action, NormalizeAction::Copied);
        assert_eq!(fs::read_to_string(&outcome.output).unwrap(), SOURCE);
    }

    #[tokio::test]
    async fn failed_rewrite_falls_back_to_original() {
        let (_temp, root, file, output_root) = setup();
        let client = ScriptedClient::new()
            .on(CLASSIFY, "light")
            .on(COMPARE, "very different")
            .on(STRIP, "def add(a, b):\n    return a + b\n")
            .fail_on(ADD);

        let outcome = normalize_file(
            &client,
            &root,
            &file,
            &output_root,
            &CommentStyle::new("verbose"),
        )
        .await
        .unwrap();

        assert_eq!(outcome.action, NormalizeAction::FellBack);
        assert_eq!(fs::read_to_string(&outcome.output).unwrap(), SOURCE);
    }

    #[tokio::test]
    async fn unreadable_source_is_an_error() {
        let (_temp, root, _file, output_root) = setup();
        let client = ScriptedClient::new();

        let result = normalize_file(
            &client,
            &root,
            &root.join("missing.py"),
            &output_root,
            &CommentStyle::default(),
        )
        .await;

        assert!(result.is_err());
        assert!(client.prompts().is_empty());
    }
}

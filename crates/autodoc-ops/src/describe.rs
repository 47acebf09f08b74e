//! Plain-text directory tree for the source root.

use std::path::{Path, PathBuf};

use autodoc_core::Artifact;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::{DocError, DocResult};

const PREVIEW_EXTENSIONS: &[&str] = &["py", "md", "txt"];

/// Knobs for the directory tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeOptions {
    pub exclude_dirs: Vec<String>,
    /// Deepest indentation level listed; the root's children are level 0.
    pub max_depth: usize,
    pub show_file_preview: bool,
    pub preview_lines: usize,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            exclude_dirs: Vec::new(),
            max_depth: 3,
            show_file_preview: false,
            preview_lines: 3,
        }
    }
}

/// Render the tree below `root` as markdown-ish text.
pub fn describe_directory(root: &Path, options: &DescribeOptions) -> DocResult<String> {
    if !root.is_dir() {
        return Err(DocError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut lines = vec![format!(
        "# Directory structure for `{}`",
        root_name(root)
    )];

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(options.max_depth + 1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e) && !is_excluded_dir(e, &options.exclude_dirs));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                continue;
            }
        };

        let indent = "  ".repeat(entry.depth() - 1);
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_dir() {
            lines.push(format!("{indent}- {name}/"));
            continue;
        }

        lines.push(format!("{indent}- {name}"));
        if options.show_file_preview && wants_preview(entry.path()) {
            if let Some(preview) = preview(entry.path(), &indent, options.preview_lines) {
                lines.push(preview);
            }
        }
    }

    Ok(lines.join("\n"))
}

/// Describe `root` and write the result into `output_root`.
pub fn write_directory_structure(
    root: &Path,
    output_root: &Path,
    options: &DescribeOptions,
) -> DocResult<PathBuf> {
    let text = describe_directory(root, options)?;
    std::fs::create_dir_all(output_root)?;
    let path = output_root.join(Artifact::DirectoryStructure.file_name());
    std::fs::write(&path, text)?;
    info!(path = %path.display(), "directory structure written");
    Ok(path)
}

fn root_name(root: &Path) -> String {
    let resolved = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(false)
}

fn is_excluded_dir(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|s| exclude_dirs.iter().any(|ex| ex == s))
            .unwrap_or(false)
}

fn wants_preview(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| PREVIEW_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

fn preview(path: &Path, indent: &str, count: usize) -> Option<String> {
    let pad = format!("{indent}    ");
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => return Some(format!("{pad}[Preview Error: {err}]")),
    };

    let head: Vec<&str> = text.lines().take(count).collect();
    let head = head.join("\n");
    let head = head.trim();
    if head.is_empty() {
        return None;
    }

    let mut block = vec![format!("{pad}Preview:"), format!("{pad}\"\"\"")];
    block.extend(head.lines().map(|line| format!("{pad}{line}")));
    block.push(format!("{pad}\"\"\""));
    Some(block.join("\n"))
}

//! Python file discovery and output-tree mirroring.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::error::{DocError, DocResult};

/// Find every `*.py` file under `root`, skipping excluded directory names.
///
/// The root itself is never excluded, so discovery can run inside the output
/// directory even though its name is on the exclusion list.
pub fn discover_python_files(root: &Path, exclude_dirs: &[String]) -> DocResult<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(DocError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_excluded(e, exclude_dirs))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                debug!("skipping unreadable entry: {err}");
                None
            }
        })
        .filter(|e| e.file_type().is_file() && is_python(e.path()))
        .map(DirEntry::into_path)
        .collect();

    files.sort();
    debug!(root = %root.display(), count = files.len(), "discovered python files");
    Ok(files)
}

fn is_excluded(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| exclude_dirs.iter().any(|ex| ex == name))
        .unwrap_or(false)
}

fn is_python(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("py")
}

/// Path of `file` inside `output_root`, keeping its sub-directories relative
/// to `root`. Missing parent directories are created.
pub fn mirror_path(root: &Path, file: &Path, output_root: &Path) -> DocResult<PathBuf> {
    let relative = file
        .strip_prefix(root)
        .map_err(|_| DocError::path_resolution(file, format!("not under {}", root.display())))?;

    let destination = output_root.join(relative);
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(destination)
}

/// `path` relative to `root` with forward slashes, for headings in reports.
pub fn display_relative(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

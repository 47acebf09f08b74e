//! Configuration for the operations layer.
//!
//! Precedence, lowest first: built-in defaults, the JSON config file in the
//! platform config directory, environment variables, then whatever the
//! caller sets explicitly (CLI flags).

use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use autodoc_core::{CommentStyle, DEFAULT_EXCLUDE_DIRS, DEFAULT_OUTPUT_DIR};
use autodoc_llm::{Backend, LlmResolver};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{DocError, DocResult};

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "model",
    "backend",
    "api-url",
    "api-key",
    "commenting-style",
    "exclude-dirs",
    "output-dir",
    "max-depth",
    "show-file-preview",
    "preview-lines",
    "summary-char-limit",
    "timeout-secs",
];

/// Configuration for autodoc operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Model endpoint and model name.
    #[serde(default)]
    pub resolver: LlmResolver,

    /// Target comment verbosity for the normalizer.
    #[serde(default)]
    pub commenting_style: CommentStyle,

    /// Directory names skipped during discovery and description.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Name of the output directory created under the source root.
    #[serde(default = "default_output_dir_name")]
    pub output_dir_name: String,

    /// Deepest level listed by the directory describer.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Include the first lines of text files in the directory listing.
    #[serde(default)]
    pub show_file_preview: bool,

    /// Number of lines shown per previewed file.
    #[serde(default = "default_preview_lines")]
    pub preview_lines: usize,

    /// Characters of each file sent to the summarizer.
    #[serde(default = "default_summary_char_limit")]
    pub summary_char_limit: usize,

    /// Per-request timeout for model calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_exclude_dirs() -> Vec<String> {
    DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect()
}

fn default_output_dir_name() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

fn default_max_depth() -> usize {
    3
}

fn default_preview_lines() -> usize {
    3
}

fn default_summary_char_limit() -> usize {
    2000
}

fn default_request_timeout_secs() -> u64 {
    300 // local models on CPU are slow
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolver: LlmResolver::default(),
            commenting_style: CommentStyle::default(),
            exclude_dirs: default_exclude_dirs(),
            output_dir_name: default_output_dir_name(),
            max_depth: default_max_depth(),
            show_file_preview: false,
            preview_lines: default_preview_lines(),
            summary_char_limit: default_summary_char_limit(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from disk with environment overrides.
    pub fn load() -> DocResult<Self> {
        Self::load_persisted()?.apply_env_overrides(|key| {
            std::env::var(key).ok().filter(|v| !v.trim().is_empty())
        })
    }

    /// Load only what is stored on disk, without environment overrides.
    ///
    /// Use this before [`Config::save`] so values that only live in the
    /// environment (API keys in particular) never end up in the file.
    pub fn load_persisted() -> DocResult<Self> {
        match Self::config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Read a configuration file, filling missing keys with defaults.
    pub fn from_file(path: &Path) -> DocResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        validate_output_dir(&config.output_dir_name)?;
        Ok(config)
    }

    /// Apply `AUTODOC_*` overrides from an arbitrary key lookup.
    pub fn apply_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> DocResult<Self> {
        self.resolver = self
            .resolver
            .apply_overrides(&lookup)
            .map_err(|e| DocError::Config(e.to_string()))?;

        if let Some(style) = lookup("AUTODOC_COMMENTING_STYLE") {
            self.commenting_style = CommentStyle::new(style);
        }
        if let Some(dirs) = lookup("AUTODOC_EXCLUDE_DIRS") {
            self.exclude_dirs = split_list(&dirs);
        }
        if let Some(dir) = lookup("AUTODOC_OUTPUT_DIR") {
            self.output_dir_name = validate_output_dir(&dir)?;
        }
        if let Some(secs) = lookup("AUTODOC_TIMEOUT_SECS") {
            self.request_timeout_secs = parse_number("AUTODOC_TIMEOUT_SECS", &secs)?;
        }
        Ok(self)
    }

    /// Save configuration to disk.
    pub fn save(&self) -> DocResult<()> {
        if let Some(path) = Self::config_file_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> DocResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "autodoc", "autodoc")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Output root for a given source root.
    pub fn output_root(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir_name)
    }

    /// Configured exclusions plus `extra`, always including the output directory.
    pub fn excluded_dirs(&self, extra: &[String]) -> Vec<String> {
        let mut dirs = self.exclude_dirs.clone();
        dirs.extend(extra.iter().cloned());
        dirs.push(self.output_dir_name.clone());
        dirs.sort();
        dirs.dedup();
        dirs
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "model" => self.resolver.model_name.clone(),
            "backend" => self.resolver.backend.to_string(),
            "api-url" => self.resolver.api_url.clone(),
            "api-key" => {
                if self.resolver.api_key.is_empty() {
                    "(not set)".to_string()
                } else {
                    "***".to_string()
                }
            }
            "commenting-style" => self.commenting_style.to_string(),
            "exclude-dirs" => self.exclude_dirs.join(","),
            "output-dir" => self.output_dir_name.clone(),
            "max-depth" => self.max_depth.to_string(),
            "show-file-preview" => self.show_file_preview.to_string(),
            "preview-lines" => self.preview_lines.to_string(),
            "summary-char-limit" => self.summary_char_limit.to_string(),
            "timeout-secs" => self.request_timeout_secs.to_string(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key.
    pub fn set(&mut self, key: &str, value: &str) -> DocResult<()> {
        match key {
            "model" => self.resolver.model_name = value.to_string(),
            "backend" => {
                self.resolver.backend = value
                    .parse::<Backend>()
                    .map_err(|e| DocError::Config(e.to_string()))?;
            }
            "api-url" => self.resolver.api_url = value.to_string(),
            "api-key" => self.resolver.api_key = value.to_string(),
            "commenting-style" => self.commenting_style = CommentStyle::new(value),
            "exclude-dirs" => self.exclude_dirs = split_list(value),
            "output-dir" => self.output_dir_name = validate_output_dir(value)?,
            "max-depth" => self.max_depth = parse_number(key, value)?,
            "show-file-preview" => {
                self.show_file_preview = value
                    .parse()
                    .map_err(|_| DocError::Config(format!("Invalid boolean: {}", value)))?;
            }
            "preview-lines" => self.preview_lines = parse_number(key, value)?,
            "summary-char-limit" => self.summary_char_limit = parse_number(key, value)?,
            "timeout-secs" => self.request_timeout_secs = parse_number(key, value)?,
            _ => {
                return Err(DocError::Config(format!(
                    "Unknown config key: {}. Valid keys: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// The output directory must be a single plain name below the source root.
/// `.`, `..`, absolute paths and nested paths would put output on top of, or
/// outside, the sources.
pub(crate) fn validate_output_dir(value: &str) -> DocResult<String> {
    let mut components = Path::new(value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !value.contains(['/', '\\']) => {
            Ok(value.to_string())
        }
        _ => Err(DocError::Config(format!(
            "output-dir must be a plain directory name, got '{}'",
            value
        ))),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|entry| entry.trim().to_string())
        .filter(|entry| !entry.is_empty())
        .collect()
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> DocResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DocError::Config(format!("Invalid number for {}: {}", key, value)))
}

//! Configuration types for end-of-file validation.
//!
//! Split into the check config (which terminators are accepted, which files
//! are in scope) and source-specific config (how files are discovered on disk).
//! [`Settings`] is the on-disk form of the check config; resolving it is the
//! only place where a bad line separator can surface.

use std::path::{Path, PathBuf};

use anyhow::Context;
use eof_terminator::{PolicyParseError, TerminatorPolicy};
use serde::Deserialize;

/// Core check config — applies regardless of input source.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct CheckConfig {
    /// Terminators accepted at the end of each file.
    pub policy: TerminatorPolicy,
    /// File extensions to check, without the leading dot. Empty means all files.
    pub file_extensions: Vec<String>,
}

impl CheckConfig {
    /// Build a config for `policy` that checks every file.
    #[must_use]
    pub fn new(policy: TerminatorPolicy) -> Self {
        Self {
            policy,
            file_extensions: Vec::new(),
        }
    }

    /// Restrict checking to the given extensions (`"rs"`, `".md"`, ...).
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.file_extensions = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Whether `path` is in scope for the configured extensions.
    #[must_use]
    pub fn accepts_file(&self, path: &Path) -> bool {
        if self.file_extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.file_extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Filesystem-specific source options.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FsSourceConfig {
    /// Paths to check (files or directories). Required, must be non-empty.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format).
    pub exclude: Vec<String>,
    /// Whether to follow symbolic links while walking directories.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
    /// Maximum total number of files to check (default: `100_000`).
    pub max_files: usize,
}

impl Default for FsSourceConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            follow_links: false,
            max_depth: 64,
            max_files: 100_000,
        }
    }
}

/// Settings as written in a `.json`, `.yaml` or `.yml` config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// One of `LF`, `CR`, `CRLF`, `LF_CR_CRLF`. Unset means `LF_CR_CRLF`.
    #[serde(alias = "lineSeparator")]
    pub line_separator: Option<String>,
    /// Extensions to check.
    pub file_extensions: Vec<String>,
    /// Exclude globs added to the filesystem source.
    pub exclude: Vec<String>,
}

impl Settings {
    /// Load settings from a JSON or YAML file, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or does not parse.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON config {}", path.display())),
            Some("yaml" | "yml") => serde_saphyr::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid YAML config {}: {e}", path.display())),
            _ => anyhow::bail!(
                "Unsupported config file format: {} (expected .json, .yaml or .yml)",
                path.display()
            ),
        }
    }

    /// Resolve into a [`CheckConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`PolicyParseError`] if `line_separator` is not a known option.
    pub fn check_config(&self) -> Result<CheckConfig, PolicyParseError> {
        let policy = match &self.line_separator {
            Some(s) => s.parse()?,
            None => TerminatorPolicy::default(),
        };
        Ok(CheckConfig::new(policy).with_extensions(&self.file_extensions))
    }
}

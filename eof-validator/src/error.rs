//! Per-file records produced by a check run.

use std::path::PathBuf;

use eof_terminator::{Violation, ViolationKind};
use serde::Serialize;

/// The kind of failure that prevented a file from being checked.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// The file opened, but its tail could not be read.
    ReadFailure,
    /// The `max_files` limit was reached, truncating the run.
    LimitExceeded,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A file that could not be checked at all.
///
/// Distinct from [`FileViolation`]: a `ScanError` means the check itself did
/// not complete for this file. CI must treat these as failures.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    /// The file path that could not be checked.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [scan error] {}", self.file.display(), self.message)
    }
}

/// A terminator violation attributed to a file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FileViolation {
    /// File the violation belongs to
    pub file: PathBuf,
    /// Always 0
    pub line: usize,
    /// Violation class
    pub kind: ViolationKind,
    /// Message text
    pub message: String,
}

impl FileViolation {
    /// Attach `violation` to `file`.
    #[must_use]
    pub fn new(file: PathBuf, violation: Violation) -> Self {
        Self {
            file,
            line: violation.line,
            kind: violation.kind,
            message: violation.message,
        }
    }

    /// Format as `{file}:{line}: {message}`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}:{}: {}", self.file.display(), self.line, self.message)
    }
}

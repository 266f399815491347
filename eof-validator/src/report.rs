//! Check report types.

use eof_terminator::TerminatorPolicy;
use serde::Serialize;

use crate::error::{FileViolation, ScanError};

/// Result of a check run.
///
/// CI pipelines must check both `violations` and `scan_errors`.
/// A non-empty `scan_errors` means some files were not fully checked.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct CheckReport {
    /// Policy the files were checked against.
    pub policy: TerminatorPolicy,
    /// Number of files whose check completed (valid or not).
    pub checked_files: usize,
    /// Number of files whose check could not complete.
    pub failed_files: usize,
    /// Whether every checked file passed AND no scan errors occurred.
    pub ok: bool,
    /// At most one violation per file.
    pub violations: Vec<FileViolation>,
    /// Files that could not be checked.
    pub scan_errors: Vec<ScanError>,
}

impl CheckReport {
    /// Total number of files attempted (checked + failed).
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.checked_files + self.failed_files
    }

    /// Number of violations found.
    #[must_use]
    pub fn violations_count(&self) -> usize {
        self.violations.len()
    }
}

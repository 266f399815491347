//! Filesystem source.
//!
//! Discovers files on disk and runs the terminator check on each of them.
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Device files, pipes, and sockets found while walking are skipped
//! - Maximum directory depth is enforced to prevent infinite recursion
//! - Explicit paths are always kept, so missing or non-regular ones are reported

use std::path::{Path, PathBuf};

use eof_terminator::{TerminatorPolicy, ValidationOutcome, validate};
use glob::Pattern;
use walkdir::WalkDir;

use crate::config::{CheckConfig, FsSourceConfig};
use crate::error::{FileViolation, ScanError, ScanErrorKind};

/// Directories to skip
pub const SKIP_DIRS: &[&str] = &["target", "node_modules", ".git"];

/// Result of checking a single file.
#[derive(Debug)]
pub enum FileResult {
    /// The file ends with an accepted terminator.
    Valid,
    /// The file has a violation.
    Violation(FileViolation),
    /// The check could not complete.
    Err(ScanError),
}

/// Check if a path matches any of the exclude patterns
fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    exclude_patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
    })
}

/// Returns `true` if the entry should be **included** (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() > 0
        && entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

/// Find all files to check in the configured paths.
///
/// Returns `(files, scan_errors)`:
/// - `files`: paths that passed all filters, sorted and de-duplicated.
/// - `scan_errors`: walk errors and invalid exclude patterns.
pub fn find_files(
    fs_config: &FsSourceConfig,
    check_config: &CheckConfig,
) -> (Vec<PathBuf>, Vec<ScanError>) {
    let mut files = Vec::new();
    let mut scan_errors = Vec::new();

    let mut exclude_patterns = Vec::with_capacity(fs_config.exclude.len());
    for pat_str in &fs_config.exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => exclude_patterns.push(pat),
            Err(e) => {
                scan_errors.push(ScanError {
                    file: PathBuf::from(pat_str),
                    kind: ScanErrorKind::InvalidExcludePattern,
                    message: format!("Invalid exclude glob pattern '{pat_str}': {e}"),
                });
            }
        }
    }

    let wanted = |path: &Path| {
        check_config.accepts_file(path) && !matches_exclude(path, &exclude_patterns)
    };

    for root in &fs_config.paths {
        if !root.is_dir() {
            // Explicit paths always reach the check: missing and non-regular
            // ones come back as unable to open.
            if wanted(root) {
                files.push(root.clone());
            }
            continue;
        }

        for entry_result in WalkDir::new(root)
            .follow_links(fs_config.follow_links)
            .max_depth(fs_config.max_depth)
            .into_iter()
            .filter_entry(is_not_skip_dir)
        {
            let entry = match entry_result {
                Ok(e) => e,
                Err(walk_err) => {
                    let path = walk_err
                        .path()
                        .map_or_else(|| root.clone(), Path::to_path_buf);
                    scan_errors.push(ScanError {
                        file: path,
                        kind: ScanErrorKind::WalkError,
                        message: format!("Directory traversal error: {walk_err}"),
                    });
                    continue;
                }
            };

            // Regular files only; devices, pipes and sockets fail `is_file`.
            if !entry.file_type().is_file() {
                continue;
            }

            if wanted(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();
    tracing::debug!(
        files = files.len(),
        errors = scan_errors.len(),
        "file discovery finished"
    );
    (files, scan_errors)
}

/// Run the terminator check on one file.
///
/// Produces at most one record for the file.
pub fn check_file(path: &Path, policy: TerminatorPolicy) -> FileResult {
    match validate(path, policy) {
        Ok(ValidationOutcome::Valid) => {
            tracing::debug!(path = %path.display(), "ok");
            FileResult::Valid
        }
        Ok(ValidationOutcome::Violation(v)) => {
            tracing::debug!(path = %path.display(), message = %v.message, "violation");
            FileResult::Violation(FileViolation::new(path.to_path_buf(), v))
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "tail read failed");
            FileResult::Err(ScanError {
                file: path.to_path_buf(),
                kind: ScanErrorKind::ReadFailure,
                message: e.to_string(),
            })
        }
    }
}

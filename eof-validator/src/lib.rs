//! # eof-validator
//!
//! Checks that files end with the configured line terminator.
//!
//! The per-file check lives in `eof-terminator`; this crate discovers files,
//! runs the check once per file and collects the results into a report.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use eof_validator::{CheckConfig, FsSourceConfig, TerminatorPolicy, check_fs};
//!
//! let mut fs_config = FsSourceConfig::default();
//! fs_config.paths = vec![PathBuf::from("src")];
//! fs_config.exclude = vec!["target/*".to_owned()];
//!
//! let check_config = CheckConfig::new(TerminatorPolicy::Lf).with_extensions(["rs"]);
//!
//! let report = check_fs(&fs_config, &check_config).unwrap();
//! println!("Files checked: {}", report.checked_files);
//! println!("Violations: {}", report.violations_count());
//! println!("OK: {}", report.ok);
//! ```

mod config;
mod error;
pub mod output;
mod report;
mod strategy;

pub use config::{CheckConfig, FsSourceConfig, Settings};
pub use eof_terminator::{PolicyParseError, TerminatorPolicy, ViolationKind};
pub use error::{FileViolation, ScanError, ScanErrorKind};
pub use report::CheckReport;

use strategy::fs::{FileResult, check_file, find_files};

/// Check every file under the configured paths.
///
/// This is the primary public API. Each file yields at most one record:
/// a [`FileViolation`] when it does not end with an accepted terminator or
/// cannot be opened, or a [`ScanError`] when its tail could not be read.
/// One file's failure never stops the others from being checked.
///
/// # Errors
///
/// Returns an error if `fs_config.paths` is empty.
pub fn check_fs(
    fs_config: &FsSourceConfig,
    check_config: &CheckConfig,
) -> anyhow::Result<CheckReport> {
    if fs_config.paths.is_empty() {
        anyhow::bail!("No paths provided for checking");
    }

    let (files, mut scan_errors) = find_files(fs_config, check_config);

    let mut violations = Vec::new();
    let mut checked_files: usize = 0;
    let mut failed_files: usize = scan_errors.len();

    for file_path in &files {
        if checked_files + failed_files >= fs_config.max_files {
            scan_errors.push(ScanError {
                file: file_path.clone(),
                kind: ScanErrorKind::LimitExceeded,
                message: format!(
                    "Check aborted: max_files limit ({}) reached; remaining files not checked",
                    fs_config.max_files
                ),
            });
            failed_files += 1;
            break;
        }

        match check_file(file_path, check_config.policy) {
            FileResult::Valid => checked_files += 1,
            FileResult::Violation(v) => {
                checked_files += 1;
                violations.push(v);
            }
            FileResult::Err(e) => {
                failed_files += 1;
                scan_errors.push(e);
            }
        }
    }

    let ok = violations.is_empty() && scan_errors.is_empty();
    tracing::info!(
        policy = %check_config.policy,
        checked_files,
        failed_files,
        violations = violations.len(),
        "check finished"
    );

    Ok(CheckReport {
        policy: check_config.policy,
        checked_files,
        failed_files,
        ok,
        violations,
        scan_errors,
    })
}

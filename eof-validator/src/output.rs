//! Shared output formatting for check reports.
//!
//! Provides JSON and plain-text formatters for `CheckReport`. The JSON form is
//! the stable contract; the text form is for people.

use std::io::Write;

use eof_terminator::ViolationKind;

use crate::report::CheckReport;

/// Format a `CheckReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `CheckReport` as human-readable plain text to a writer.
///
/// Layout: a one-line header, a count per violation kind, then one line per
/// violation and per scan error, and a closing verdict.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let count_kind = |kind: ViolationKind| {
        report
            .violations
            .iter()
            .filter(|v| v.kind == kind)
            .count()
    };

    writeln!(
        writer,
        "eof-validator [{}]: {} of {} file(s) checked",
        report.policy,
        report.checked_files,
        report.files_attempted()
    )?;
    writeln!(
        writer,
        "  missing terminator: {}",
        count_kind(ViolationKind::NoTerminator)
    )?;
    writeln!(
        writer,
        "  unable to open:     {}",
        count_kind(ViolationKind::UnableToOpen)
    )?;
    writeln!(writer, "  not checked:        {}", report.failed_files)?;

    for violation in &report.violations {
        writeln!(writer, "{}", violation.format_human_readable())?;
    }
    for scan_err in &report.scan_errors {
        writeln!(writer, "{}", scan_err.format_human_readable())?;
    }

    if report.ok {
        writeln!(
            writer,
            "OK: all {} file(s) end with {}",
            report.checked_files, report.policy
        )?;
    } else {
        writeln!(
            writer,
            "FAILED: {} violation(s), {} scan error(s)",
            report.violations_count(),
            report.scan_errors.len()
        )?;
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    use eof_terminator::{TerminatorPolicy, Violation};

    use crate::error::{FileViolation, ScanError, ScanErrorKind};

    fn render(report: &CheckReport) -> String {
        let mut buf = Vec::new();
        write_human(report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_human_breaks_down_by_kind() {
        let gone = Path::new("gone.txt");
        let report = CheckReport {
            policy: TerminatorPolicy::Crlf,
            checked_files: 3,
            failed_files: 1,
            ok: false,
            violations: vec![
                FileViolation::new(PathBuf::from("a.txt"), Violation::no_terminator()),
                FileViolation::new(PathBuf::from("b.txt"), Violation::no_terminator()),
                FileViolation::new(gone.to_path_buf(), Violation::unable_to_open(gone)),
            ],
            scan_errors: vec![ScanError {
                file: PathBuf::from("c.txt"),
                kind: ScanErrorKind::ReadFailure,
                message: "Unable to read 2 bytes, got 0".to_owned(),
            }],
        };

        let text = render(&report);
        assert!(text.starts_with("eof-validator [CRLF]: 3 of 4 file(s) checked\n"));
        assert!(text.contains("  missing terminator: 2\n"));
        assert!(text.contains("  unable to open:     1\n"));
        assert!(text.contains("  not checked:        1\n"));
        assert!(text.contains("gone.txt:0: Unable to open 'gone.txt'."));
        assert!(text.contains("c.txt: [scan error] Unable to read 2 bytes, got 0"));
        assert!(text.ends_with("FAILED: 3 violation(s), 1 scan error(s)\n"));
    }

    #[test]
    fn test_human_clean_run() {
        let report = CheckReport {
            policy: TerminatorPolicy::Lf,
            checked_files: 2,
            failed_files: 0,
            ok: true,
            violations: vec![],
            scan_errors: vec![],
        };
        assert!(render(&report).ends_with("OK: all 2 file(s) end with LF\n"));
    }
}

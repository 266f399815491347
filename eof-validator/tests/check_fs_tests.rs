//! Integration tests for `eof_validator::check_fs`.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;

use eof_validator::{
    CheckConfig, FsSourceConfig, ScanErrorKind, TerminatorPolicy, ViolationKind, check_fs,
};
use tempfile::TempDir;

fn default_fs_config(paths: Vec<PathBuf>) -> FsSourceConfig {
    let mut cfg = FsSourceConfig::default();
    cfg.paths = paths;
    cfg
}

fn check_config(policy: TerminatorPolicy) -> CheckConfig {
    CheckConfig::new(policy)
}

#[test]
fn test_check_fs_empty_paths_errors() {
    let fs_config = default_fs_config(vec![]);
    let result = check_fs(&fs_config, &check_config(TerminatorPolicy::Lf));
    assert!(result.is_err());
    let msg = result.unwrap_err().to_string();
    assert!(msg.contains("No paths provided"), "got: {msg}");
}

#[test]
fn test_check_fs_all_files_valid() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.txt"), "abc\n").unwrap();
    fs::write(tmp.path().join("b.txt"), "line\nline\n").unwrap();

    let report = check_fs(
        &default_fs_config(vec![tmp.path().to_path_buf()]),
        &check_config(TerminatorPolicy::Lf),
    )
    .unwrap();

    assert_eq!(report.checked_files, 2);
    assert_eq!(report.failed_files, 0);
    assert!(report.ok, "unexpected violations: {:?}", report.violations);
}

#[test]
fn test_check_fs_reports_one_violation_per_file() {
    let tmp = TempDir::new().unwrap();
    let bad = tmp.path().join("bad.txt");
    let empty = tmp.path().join("empty.txt");
    fs::write(&bad, "abc").unwrap();
    fs::write(&empty, "").unwrap();
    fs::write(tmp.path().join("good.txt"), "abc\n").unwrap();

    let report = check_fs(
        &default_fs_config(vec![tmp.path().to_path_buf()]),
        &check_config(TerminatorPolicy::Lf),
    )
    .unwrap();

    assert_eq!(report.checked_files, 3);
    assert!(!report.ok);
    assert_eq!(report.violations_count(), 2);

    let files: Vec<_> = report.violations.iter().map(|v| v.file.clone()).collect();
    assert_eq!(files, vec![bad, empty]);
    for v in &report.violations {
        assert_eq!(v.line, 0);
        assert_eq!(v.kind, ViolationKind::NoTerminator);
        assert_eq!(v.message, "File does not end with a newline.");
    }
}

#[test]
fn test_check_fs_crlf_is_not_lf() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("dos.txt");
    fs::write(&file, "abc\r\n").unwrap();
    let fs_config = default_fs_config(vec![file]);

    let strict = check_fs(&fs_config, &check_config(TerminatorPolicy::Lf)).unwrap();
    assert_eq!(strict.violations_count(), 1);

    let crlf = check_fs(&fs_config, &check_config(TerminatorPolicy::Crlf)).unwrap();
    assert!(crlf.ok);

    let any = check_fs(&fs_config, &check_config(TerminatorPolicy::Any)).unwrap();
    assert!(any.ok);
}

#[test]
fn test_check_fs_any_accepts_mixed_terminators() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("lf.txt"), "a\n").unwrap();
    fs::write(tmp.path().join("cr.txt"), "a\r").unwrap();
    fs::write(tmp.path().join("crlf.txt"), "a\r\n").unwrap();

    let report = check_fs(
        &default_fs_config(vec![tmp.path().to_path_buf()]),
        &check_config(TerminatorPolicy::Any),
    )
    .unwrap();

    assert_eq!(report.checked_files, 3);
    assert!(report.ok);
}

#[test]
fn test_check_fs_missing_file_is_unable_to_open() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing.txt");

    let report = check_fs(
        &default_fs_config(vec![missing.clone()]),
        &check_config(TerminatorPolicy::Any),
    )
    .unwrap();

    assert_eq!(report.checked_files, 1);
    assert_eq!(report.violations_count(), 1);
    let v = &report.violations[0];
    assert_eq!(v.kind, ViolationKind::UnableToOpen);
    assert_eq!(v.message, format!("Unable to open '{}'.", missing.display()));
}

#[cfg(unix)]
#[test]
fn test_check_fs_explicit_fifo_is_unable_to_open() {
    let tmp = TempDir::new().unwrap();
    let fifo = tmp.path().join("pipe");
    let status = std::process::Command::new("mkfifo")
        .arg(&fifo)
        .status()
        .unwrap();
    assert!(status.success());

    let report = check_fs(
        &default_fs_config(vec![fifo.clone()]),
        &check_config(TerminatorPolicy::Any),
    )
    .unwrap();

    assert!(!report.ok);
    assert_eq!(report.checked_files, 1);
    assert_eq!(report.violations_count(), 1);
    let v = &report.violations[0];
    assert_eq!(v.kind, ViolationKind::UnableToOpen);
    assert_eq!(v.message, format!("Unable to open '{}'.", fifo.display()));
}

#[test]
fn test_check_fs_missing_file_does_not_stop_others() {
    let tmp = TempDir::new().unwrap();
    let good = tmp.path().join("good.txt");
    let bad = tmp.path().join("bad.txt");
    fs::write(&good, "x\n").unwrap();
    fs::write(&bad, "x").unwrap();

    let report = check_fs(
        &default_fs_config(vec![tmp.path().join("nope.txt"), good, bad]),
        &check_config(TerminatorPolicy::Lf),
    )
    .unwrap();

    assert_eq!(report.checked_files, 3);
    assert_eq!(report.violations_count(), 2);
}

#[test]
fn test_check_fs_extension_filter() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Main.java"), "class Main {}").unwrap();
    fs::write(tmp.path().join("notes.txt"), "no newline").unwrap();

    let config = CheckConfig::new(TerminatorPolicy::Lf).with_extensions(["java"]);
    let report = check_fs(&default_fs_config(vec![tmp.path().to_path_buf()]), &config).unwrap();

    assert_eq!(report.checked_files, 1);
    assert_eq!(report.violations_count(), 1);
    assert!(report.violations[0].file.ends_with("Main.java"));
}

#[test]
fn test_check_fs_max_files_limit() {
    let tmp = TempDir::new().unwrap();
    for name in ["a.txt", "b.txt", "c.txt"] {
        fs::write(tmp.path().join(name), "x\n").unwrap();
    }

    let mut fs_config = default_fs_config(vec![tmp.path().to_path_buf()]);
    fs_config.max_files = 2;
    let report = check_fs(&fs_config, &check_config(TerminatorPolicy::Lf)).unwrap();

    assert_eq!(report.checked_files, 2);
    assert_eq!(report.failed_files, 1);
    assert!(!report.ok);
    assert_eq!(report.scan_errors[0].kind, ScanErrorKind::LimitExceeded);
}

#[test]
fn test_check_fs_is_repeatable() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.txt"), "abc").unwrap();
    let fs_config = default_fs_config(vec![tmp.path().to_path_buf()]);
    let config = check_config(TerminatorPolicy::Lf);

    let first = check_fs(&fs_config, &config).unwrap();
    let second = check_fs(&fs_config, &config).unwrap();
    assert_eq!(first.violations, second.violations);
}

#[test]
fn test_check_fs_json_output_contract() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("a.txt"), "abc").unwrap();

    let report = check_fs(
        &default_fs_config(vec![tmp.path().to_path_buf()]),
        &check_config(TerminatorPolicy::Any),
    )
    .unwrap();

    let mut buf = Vec::new();
    eof_validator::output::write_json(&report, &mut buf).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert_eq!(json["policy"], "LF_CR_CRLF");
    assert_eq!(json["checked_files"], 1);
    assert_eq!(json["ok"], false);
    assert_eq!(json["violations"][0]["line"], 0);
    assert_eq!(json["violations"][0]["kind"], "no_terminator");
    assert_eq!(
        json["violations"][0]["message"],
        "File does not end with a newline."
    );
    assert!(json["scan_errors"].as_array().unwrap().is_empty());
}

#[test]
fn test_check_fs_human_output() {
    let tmp = TempDir::new().unwrap();
    let bad = tmp.path().join("a.txt");
    fs::write(&bad, "abc").unwrap();

    let report = check_fs(
        &default_fs_config(vec![tmp.path().to_path_buf()]),
        &check_config(TerminatorPolicy::Lf),
    )
    .unwrap();

    let mut buf = Vec::new();
    eof_validator::output::write_human(&report, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.starts_with("eof-validator [LF]: 1 of 1 file(s) checked\n"));
    assert!(text.contains("  missing terminator: 1\n"));
    assert!(text.contains(&format!(
        "{}:0: File does not end with a newline.",
        bad.display()
    )));
    assert!(text.contains("FAILED: 1 violation(s), 0 scan error(s)"));
}

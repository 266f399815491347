//! End-of-file line terminator checks.
//!
//! This crate decides whether the last bytes of a file form a line terminator
//! accepted by a [`TerminatorPolicy`]. Only the tail of the file is read, so the
//! check costs the same for a ten-byte file and a ten-gigabyte one.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use eof_terminator::{TerminatorPolicy, ValidationOutcome, validate};
//!
//! let policy: TerminatorPolicy = "LF".parse().unwrap();
//! match validate(Path::new("src/lib.rs"), policy).unwrap() {
//!     ValidationOutcome::Valid => {}
//!     ValidationOutcome::Violation(v) => println!("{}: {}", v.line, v.message),
//! }
//! ```

mod policy;

pub use policy::{PolicyParseError, Terminator, TerminatorPolicy};

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Message reported when a file does not end with an accepted terminator.
pub const MSG_NO_NEWLINE_EOF: &str = "File does not end with a newline.";

/// Errors raised while reading the tail of a file that was opened successfully.
#[derive(Debug, Error)]
pub enum TerminatorError {
    /// Fewer bytes came back than the file length promised.
    #[error("Unable to read {requested} bytes, got {actual}")]
    ShortRead {
        /// Bytes requested at the tail offset.
        requested: usize,
        /// Bytes actually obtained.
        actual: usize,
    },

    /// Seeking or reading failed outright.
    #[error("I/O error while reading file tail: {0}")]
    Io(#[from] io::Error),
}

/// The class of a reported violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// The file is empty or its last bytes are not an accepted terminator.
    NoTerminator,
    /// The file could not be opened for reading.
    UnableToOpen,
}

/// A file-level defect. Always reported at line 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Always 0: the defect belongs to the file, not to a line.
    pub line: usize,
    /// What went wrong.
    pub kind: ViolationKind,
    /// Message text, stable across releases.
    pub message: String,
}

impl Violation {
    /// Violation for a file that is empty or ends without an accepted terminator.
    #[must_use]
    pub fn no_terminator() -> Self {
        Self {
            line: 0,
            kind: ViolationKind::NoTerminator,
            message: MSG_NO_NEWLINE_EOF.to_owned(),
        }
    }

    /// Violation for a file that could not be opened.
    #[must_use]
    pub fn unable_to_open(path: &Path) -> Self {
        Self {
            line: 0,
            kind: ViolationKind::UnableToOpen,
            message: format!("Unable to open '{}'.", path.display()),
        }
    }
}

/// Result of checking one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The file ends with an accepted terminator.
    Valid,
    /// The file has exactly one defect.
    Violation(Violation),
}

impl ValidationOutcome {
    /// Whether the outcome is [`ValidationOutcome::Valid`].
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Check that the file at `path` ends with a terminator accepted by `policy`.
///
/// A file that cannot be opened, or is not a regular file, yields an
/// [`ViolationKind::UnableToOpen`] violation rather than an error. An empty file
/// never satisfies any policy. The file handle is closed before returning.
///
/// # Errors
///
/// Returns [`TerminatorError`] if the file was opened but its tail could not be
/// read in full.
pub fn validate(
    path: &Path,
    policy: TerminatorPolicy,
) -> Result<ValidationOutcome, TerminatorError> {
    let Some(mut file) = open_regular(path) else {
        return Ok(ValidationOutcome::Violation(Violation::unable_to_open(path)));
    };

    if ends_with_terminator(&mut file, policy)? {
        Ok(ValidationOutcome::Valid)
    } else {
        Ok(ValidationOutcome::Violation(Violation::no_terminator()))
    }
}

/// Check whether `source` ends with a terminator accepted by `policy`.
///
/// Reads [`TerminatorPolicy::tail_len`] bytes from the end of the source, or
/// the whole source if it is shorter. Under [`TerminatorPolicy::Lf`] a trailing
/// `\n` costs one more single-byte read to rule out `\r\n`.
///
/// # Errors
///
/// Returns [`TerminatorError::ShortRead`] if the source yields fewer bytes
/// than its length implies, and [`TerminatorError::Io`] on seek or read failure.
pub fn ends_with_terminator<R: Read + Seek>(
    source: &mut R,
    policy: TerminatorPolicy,
) -> Result<bool, TerminatorError> {
    let len = source.seek(SeekFrom::End(0))?;
    let count = usize::try_from(len.min(policy.tail_len() as u64)).unwrap_or(0);
    if count == 0 {
        return Ok(false);
    }

    let mut tail = read_at(source, len - count as u64, count)?;

    // A lone `\n` may be the end of `\r\n`; look one byte further back.
    if policy == TerminatorPolicy::Lf && tail == b"\n" && len > 1 {
        let mut before = read_at(source, len - 2, 1)?;
        before.append(&mut tail);
        tail = before;
    }

    Ok(policy.matches(&tail))
}

fn open_regular(path: &Path) -> Option<File> {
    // Opening a FIFO for reading blocks until a writer appears, so the type
    // is checked before the open and again on the handle.
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            tracing::debug!(path = %path.display(), "not a regular file");
            return None;
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "metadata failed");
            return None;
        }
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "open failed");
            return None;
        }
    };
    match file.metadata() {
        Ok(meta) if meta.is_file() => Some(file),
        Ok(_) => {
            tracing::debug!(path = %path.display(), "replaced by a non-regular file");
            None
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "metadata failed");
            None
        }
    }
}

/// Read exactly `count` bytes starting at `offset`.
fn read_at<R: Read + Seek>(
    source: &mut R,
    offset: u64,
    count: usize,
) -> Result<Vec<u8>, TerminatorError> {
    source.seek(SeekFrom::Start(offset))?;
    tracing::trace!(offset, count, "reading tail");

    let mut buf = vec![0u8; count];
    let mut filled = 0;
    while filled < count {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }

    if filled < count {
        return Err(TerminatorError::ShortRead {
            requested: count,
            actual: filled,
        });
    }
    Ok(buf)
}

//! Line terminators and the policies that decide which of them may end a file.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// A single line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminator {
    /// `\n`
    Lf,
    /// `\r`
    Cr,
    /// `\r\n`
    Crlf,
}

impl Terminator {
    /// The byte sequence of this terminator.
    #[must_use]
    pub const fn bytes(self) -> &'static [u8] {
        match self {
            Self::Lf => b"\n",
            Self::Cr => b"\r",
            Self::Crlf => b"\r\n",
        }
    }

    /// Classify the terminator a byte tail ends with.
    ///
    /// `\r\n` is always reported as [`Terminator::Crlf`], never as a bare LF.
    /// A tail of a single `\n` is classified as LF, so callers that need to
    /// tell LF from CRLF must pass at least two bytes when they are available.
    #[must_use]
    pub fn trailing(tail: &[u8]) -> Option<Self> {
        [Self::Crlf, Self::Lf, Self::Cr]
            .into_iter()
            .find(|t| tail.ends_with(t.bytes()))
    }
}

/// Error returned when a textual line separator option is not recognized.
///
/// This is a configuration error: it is raised while settings are resolved,
/// never while a file is being checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid line separator '{value}': expected one of LF, CR, CRLF, LF_CR_CRLF")]
pub struct PolicyParseError {
    /// The rejected input, as given.
    pub value: String,
}

/// Which terminators are accepted at the end of a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TerminatorPolicy {
    /// Only `\n`. A file ending in `\r\n` does not satisfy this policy.
    #[serde(rename = "LF")]
    Lf,
    /// Only `\r`.
    #[serde(rename = "CR")]
    Cr,
    /// Only `\r\n`.
    #[serde(rename = "CRLF")]
    Crlf,
    /// Any of `\n`, `\r` or `\r\n`.
    #[default]
    #[serde(rename = "LF_CR_CRLF")]
    Any,
}

impl TerminatorPolicy {
    /// Every policy, in declaration order.
    pub const ALL: [Self; 4] = [Self::Lf, Self::Cr, Self::Crlf, Self::Any];

    /// Configuration name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "LF",
            Self::Cr => "CR",
            Self::Crlf => "CRLF",
            Self::Any => "LF_CR_CRLF",
        }
    }

    /// The closed set of terminators this policy accepts.
    #[must_use]
    pub const fn accepted(self) -> &'static [Terminator] {
        match self {
            Self::Lf => &[Terminator::Lf],
            Self::Cr => &[Terminator::Cr],
            Self::Crlf => &[Terminator::Crlf],
            Self::Any => &[Terminator::Lf, Terminator::Cr, Terminator::Crlf],
        }
    }

    /// Length of the longest accepted terminator: the bytes read from the end
    /// of a file.
    #[must_use]
    pub fn tail_len(self) -> usize {
        self.accepted()
            .iter()
            .map(|t| t.bytes().len())
            .max()
            .unwrap_or(1)
    }

    /// Whether `tail` (the last bytes of a file) ends with an accepted terminator.
    #[must_use]
    pub fn matches(self, tail: &[u8]) -> bool {
        Terminator::trailing(tail).is_some_and(|t| self.accepted().contains(&t))
    }
}

impl fmt::Display for TerminatorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminatorPolicy {
    type Err = PolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PolicyParseError {
                value: s.to_owned(),
            })
    }
}

//! Error types for catalogue IO, message matching and suite completion.

use std::{io, path::PathBuf};

use super::GuardKind;

/// Errors raised while reading or writing a catalogue file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read diagnostic messages file {}.", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse diagnostic messages file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Failed to load diagnostic messages file {} as it is incorrectly formatted with duplicate entries for code {code}",
        .path.display()
    )]
    DuplicateCode { path: PathBuf, code: u16 },

    #[error("Failed to write diagnostic messages file {}.", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An observed message that disagrees with its catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchFailure {
    #[error(
        "Failed to match {kind} diagnostic message with key {key} and code {code}.\nExpected pattern:\n{pattern}\n\nActual Message:\n{actual}"
    )]
    Pattern {
        kind: GuardKind,
        key: String,
        code: u16,
        pattern: String,
        actual: String,
    },

    #[error("Failed to match diagnostic message type with key {key} and code {code}.")]
    Kind {
        key: String,
        code: u16,
        expected: GuardKind,
        actual: GuardKind,
    },
}

/// Errors surfaced by the collector lifecycle hooks.
#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Invalid message key {key:?}: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error(
        "Diagnostic messages template is out of date. {} messages need to be updated including messages:\n{}",
        .messages.len(),
        .messages.join("\n")
    )]
    Drift { messages: Vec<String> },
}

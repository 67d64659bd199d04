//! Error taxonomy for a changelog run.
//!
//! Every failure is fatal to the run: nothing is retried and no partial
//! changelog is left behind. Formatting edge cases are not errors; they
//! simply produce no line.

use std::path::PathBuf;

/// Errors surfaced to the caller of a changelog run.
#[derive(Debug, thiserror::Error)]
pub enum ChangelogError {
    /// An input document could not be read.
    #[error("failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input document is not a parseable API description.
    #[error("failed to parse OpenAPI document {origin}: {reason}")]
    Parse { origin: String, reason: String },

    /// The change source failed to compare the two documents.
    #[error("failed to compare documents: {0}")]
    Diff(String),

    /// The changelog could not be created, written, or flushed.
    #[error("failed to write changelog {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file could not be loaded.
    #[error("failed to load configuration: {reason}")]
    Config { reason: String },

    /// Rendering the changelog as JSON failed.
    #[error("failed to serialize changelog: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ChangelogError {
    pub(crate) fn parse(origin: &str, reason: impl std::fmt::Display) -> Self {
        ChangelogError::Parse {
            origin: origin.to_string(),
            reason: reason.to_string(),
        }
    }
}

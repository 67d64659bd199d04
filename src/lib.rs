pub mod canonical;
pub mod changelog;
pub mod diff;
pub mod error;
pub mod generator;
pub mod normalize;
pub mod spec;

pub use changelog::{ChangelogConfig, ChangelogDocument, OutputFormat, Section};
pub use diff::{ChangeSource, OpenApiDiff};
pub use error::ChangelogError;
pub use generator::{ChangelogGenerator, GenerateOptions};
pub use spec::Spec;

use std::path::{Path, PathBuf};

/// Generates a changelog describing how `previous` evolved into `latest`.
///
/// Both inputs are OpenAPI (or Swagger) documents in YAML or JSON. The
/// changelog is written to `output` only when at least one change renders
/// to a line.
///
/// # Arguments
///
/// * `latest` - Path to the newer document.
/// * `previous` - Path to the older document.
/// * `output` - Destination of the changelog file.
/// * `options` - Configuration, output format and header date.
///
/// # Returns
///
/// `Some(output)` when a changelog was written, `None` when no changes were
/// detected, or an error if reading, parsing, diffing or writing fails.
pub fn generate_changelog(
    latest: &Path,
    previous: &Path,
    output: &Path,
    options: GenerateOptions,
) -> Result<Option<PathBuf>, ChangelogError> {
    ChangelogGenerator::new(options).run(latest, previous, output)
}

/// Generates the semantic fingerprint of an API document.
///
/// The fingerprint is a SHA-256 hash of the document's canonical
/// representation, so it is insensitive to comments, formatting and key
/// order.
pub fn generate_fingerprint(content: &str) -> Result<String, ChangelogError> {
    Ok(Spec::try_from(content, "input")?.fingerprint)
}

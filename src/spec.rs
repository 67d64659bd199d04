//! Provides the high-level Spec API for comparing API documents.

use crate::canonical::CanonicalDocument;
use crate::changelog::types::ChangeTree;
use crate::diff::{ChangeSource, OpenApiDiff};
use crate::error::ChangelogError;
use crate::normalize;
use sha2::{Digest, Sha256};

/// Version reported when a document does not declare one.
pub const UNKNOWN_VERSION: &str = "Unknown";

/// Represents a single parsed API document, holding its derived models for comparison.
#[derive(Debug, Clone)]
pub struct Spec {
    /// Where the document came from (file path or a caller-chosen label).
    pub origin: String,
    /// The canonical model.
    pub document: CanonicalDocument,
    /// The semantic fingerprint.
    pub fingerprint: String,
}

impl Spec {
    /// Creates a new `Spec` from the YAML or JSON content of an API document.
    ///
    /// The top level must be a mapping carrying an `openapi` or `swagger` key.
    pub fn try_from(content: &str, origin: &str) -> Result<Self, ChangelogError> {
        let root: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ChangelogError::parse(origin, e))?;

        let mapping = root
            .as_mapping()
            .ok_or_else(|| ChangelogError::parse(origin, "top level is not a mapping"))?;
        if !mapping.contains_key("openapi") && !mapping.contains_key("swagger") {
            return Err(ChangelogError::parse(
                origin,
                "missing `openapi` or `swagger` version key",
            ));
        }

        let document = normalize::normalize_document(&root);
        let fingerprint = fingerprint_of(&document)?;

        Ok(Spec {
            origin: origin.to_string(),
            document,
            fingerprint,
        })
    }

    /// Reads and parses a document from disk.
    pub fn from_path(path: &std::path::Path) -> Result<Self, ChangelogError> {
        let content = std::fs::read_to_string(path).map_err(|source| ChangelogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::try_from(&content, &path.display().to_string())
    }

    /// The `info.version` of the document, or `"Unknown"`.
    pub fn api_version(&self) -> String {
        self.document
            .version
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
    }

    /// Compares this `Spec` (the "previous" version) with another `Spec` (the
    /// "latest" version) and returns the structured changes between them.
    pub fn compare_with(&self, latest: &Spec) -> Result<ChangeTree, ChangelogError> {
        OpenApiDiff.compare(self, latest)
    }
}

/// SHA-256 of the canonical model's JSON form, hex encoded.
///
/// Insensitive to formatting, comments, and key order.
fn fingerprint_of(document: &CanonicalDocument) -> Result<String, ChangelogError> {
    let json_string = serde_json::to_string(document)?;

    let mut hasher = Sha256::new();
    hasher.update(json_string.as_bytes());
    let hash_result = hasher.finalize();

    Ok(format!("{:x}", hash_result))
}

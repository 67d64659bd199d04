//! Changelog document assembly and output
//!
//! The document is fully rendered in memory, written to a temporary file
//! next to the destination, flushed, and only then moved into place. A
//! failed run never leaves a half-written changelog at the destination.

use crate::changelog::categories::Section;
use crate::changelog::engine::ChangelogResult;
use crate::error::ChangelogError;
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Output encoding of the changelog file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

/// Counts shown under the version header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Raw change count reported by the change source
    pub total_changes: usize,
    pub breaking_changes: usize,
    pub endpoints_added: usize,
    pub endpoints_removed: usize,
}

/// One rendered section with its entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub section: Section,
    pub entries: Vec<String>,
}

/// The final changelog artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogDocument {
    pub title: String,
    pub api_version: String,
    pub date: String,
    pub summary: Summary,
    /// Non-empty sections in fixed order
    pub sections: Vec<DocumentSection>,
}

impl ChangelogDocument {
    /// Builds the document, or `None` when there is nothing to report
    ///
    /// A document exists only when the change source reported changes and at
    /// least one of them rendered to a line.
    pub fn assemble(
        title: &str,
        api_version: &str,
        date: &str,
        total_changes: usize,
        result: &ChangelogResult,
    ) -> Option<Self> {
        if total_changes == 0 || result.is_empty() {
            return None;
        }

        let sections = Section::all()
            .into_iter()
            .filter_map(|section| {
                let entries = result.lines(section);
                (!entries.is_empty()).then(|| DocumentSection {
                    section,
                    entries: entries.to_vec(),
                })
            })
            .collect();

        Some(Self {
            title: title.to_string(),
            api_version: api_version.to_string(),
            date: date.to_string(),
            summary: Summary {
                total_changes,
                breaking_changes: result.count(Section::Breaking),
                endpoints_added: result.count(Section::NewEndpoints),
                endpoints_removed: result.count(Section::RemovedEndpoints),
            },
            sections,
        })
    }

    /// Entries of a section, if it is present in the document
    pub fn section(&self, section: Section) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|s| s.section == section)
            .map(|s| s.entries.as_slice())
    }

    /// Renders the Markdown form
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("# {}\n", self.title));
        out.push_str(&format!("\n## [{}] - {}\n\n", self.api_version, self.date));

        out.push_str(&format!("**Total Changes:** {}\n", self.summary.total_changes));
        out.push_str(&format!("**Breaking Changes:** {}\n", self.summary.breaking_changes));
        if self.summary.endpoints_added > 0 {
            out.push_str(&format!("**Endpoints Added:** {}\n", self.summary.endpoints_added));
        }
        if self.summary.endpoints_removed > 0 {
            out.push_str(&format!("**Endpoints Removed:** {}\n", self.summary.endpoints_removed));
        }
        out.push('\n');

        for section in &self.sections {
            out.push_str(section.section.heading());
            out.push('\n');
            for entry in &section.entries {
                out.push_str(&format!("- {entry}\n"));
            }
            out.push('\n');
        }

        out
    }

    /// Renders the document in the requested format
    pub fn render_as(&self, format: OutputFormat) -> Result<String, ChangelogError> {
        match format {
            OutputFormat::Markdown => Ok(self.render()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Writes the document to `path`
    pub fn write_to(&self, path: &Path, format: OutputFormat) -> Result<(), ChangelogError> {
        let content = self.render_as(format)?;
        let write_err = |source: std::io::Error| ChangelogError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;

        let mut writer = BufWriter::new(temp);
        writer.write_all(content.as_bytes()).map_err(write_err)?;
        let temp = writer
            .into_inner()
            .map_err(|e| write_err(e.into_error()))?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(path).map_err(|e| write_err(e.error))?;

        debug!(path = %path.display(), bytes = content.len(), "changelog written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble(total_changes: usize, result: &ChangelogResult) -> Option<ChangelogDocument> {
        ChangelogDocument::assemble("API Changelog", "2.0.0", "2024-05-01", total_changes, result)
    }

    fn sample_result() -> ChangelogResult {
        let mut result = ChangelogResult::new();
        result.push(Section::Breaking, "Endpoint `/legacy` removed".to_string());
        result.push(Section::RemovedEndpoints, "Endpoint `/legacy` removed".to_string());
        result.push(Section::Added, "**GET /pets**: Response code `201` added".to_string());
        result.rendered_changes = 2;
        result
    }

    #[test]
    fn test_nothing_to_report() {
        let empty = ChangelogResult::new();
        assert!(assemble(0, &empty).is_none());
        assert!(assemble(3, &empty).is_none());
        assert!(assemble(0, &sample_result()).is_none());
    }

    #[test]
    fn test_render_layout() {
        let doc = assemble(4, &sample_result()).expect("document expected");

        let expected = "# API Changelog\n\
\n\
## [2.0.0] - 2024-05-01\n\
\n\
**Total Changes:** 4\n\
**Breaking Changes:** 1\n\
**Endpoints Removed:** 1\n\
\n\
### ⚠️ Breaking Changes\n\
- Endpoint `/legacy` removed\n\
\n\
### 🗑️ Removed Endpoints\n\
- Endpoint `/legacy` removed\n\
\n\
### ✨ Added\n\
- **GET /pets**: Response code `201` added\n\
\n";
        assert_eq!(doc.render(), expected);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let doc = assemble(4, &sample_result()).expect("document expected");

        let rendered = doc.render();
        assert!(!rendered.contains("New Endpoints"));
        assert!(!rendered.contains("Endpoints Added"));
        assert!(!rendered.contains("Modified"));
        assert!(doc.section(Section::Modified).is_none());
        assert_eq!(doc.sections.len(), 3);
    }

    #[test]
    fn test_multiline_entries_keep_their_lines() {
        let mut result = ChangelogResult::new();
        result.push(
            Section::Modified,
            "**GET /pets**: Description updated:\n  - Old: a\n  - New: b".to_string(),
        );
        result.rendered_changes = 1;
        let doc = assemble(1, &result).expect("document expected");

        assert!(doc.render().contains(concat!(
            "### 🔄 Modified\n",
            "- **GET /pets**: Description updated:\n  - Old: a\n  - New: b\n",
        )));
    }

    #[test]
    fn test_json_rendering() {
        let doc = assemble(4, &sample_result()).expect("document expected");

        let json = doc.render_as(OutputFormat::Json).expect("json rendering");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["api_version"], "2.0.0");
        assert_eq!(value["summary"]["breaking_changes"], 1);
        assert_eq!(value["sections"][0]["section"], "Breaking");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("CHANGELOG.md");
        let doc = assemble(4, &sample_result()).expect("document expected");

        doc.write_to(&path, OutputFormat::Markdown).expect("write succeeds");

        let written = std::fs::read_to_string(&path).expect("readable output");
        assert_eq!(written, doc.render());
    }

    #[test]
    fn test_write_to_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing").join("CHANGELOG.md");
        let doc = assemble(4, &sample_result()).expect("document expected");

        let err = doc.write_to(&path, OutputFormat::Markdown).unwrap_err();
        assert!(matches!(err, ChangelogError::Write { .. }));
        assert!(!path.exists());
    }
}

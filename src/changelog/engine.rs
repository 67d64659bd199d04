//! Changelog classification engine
//!
//! Walks a `ChangeTree` in four passes (operations, schemas, component
//! groups, catch-all), sharing one `Deduplicator` across all of them, and
//! fills the section buckets of a `ChangelogResult`.

use crate::changelog::categories::Section;
use crate::changelog::classifier::classify;
use crate::changelog::dedup::Deduplicator;
use crate::changelog::formatter::format_with_context;
use crate::changelog::types::{ChangeRecord, ChangeTree};
use crate::error::ChangelogError;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Context label for component-level changes
pub const COMPONENTS_CONTEXT: &str = "Components";

/// Configuration for changelog generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogConfig {
    /// Document title
    #[serde(default = "default_title")]
    pub title: String,
    /// Properties whose changes are never rendered or counted
    #[serde(default)]
    pub ignore_properties: Vec<String>,
    /// strftime format of the header date
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_title() -> String {
    "API Changelog".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl ChangelogConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ChangelogError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ChangelogError::Config {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ChangelogError> {
        #[derive(serde::Deserialize)]
        struct ConfigFile {
            changelog: Option<ChangelogConfig>,
        }

        let config_file: ConfigFile =
            serde_yaml::from_str(yaml).map_err(|e| ChangelogError::Config {
                reason: e.to_string(),
            })?;
        let config = config_file.changelog.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Rejects a `date_format` that chrono cannot render
    pub fn validate(&self) -> Result<(), ChangelogError> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ChangelogError::Config {
                reason: format!("invalid date_format `{}`", self.date_format),
            });
        }
        Ok(())
    }

    fn ignores(&self, record: &ChangeRecord) -> bool {
        self.ignore_properties.iter().any(|p| *p == record.property)
    }
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            ignore_properties: Vec::new(),
            date_format: default_date_format(),
        }
    }
}

/// Rendered lines per section for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogResult {
    /// Lines per section, in append order
    pub sections: BTreeMap<Section, Vec<String>>,
    /// Number of distinct records that produced a line
    pub rendered_changes: usize,
}

impl ChangelogResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to a section bucket
    pub fn push(&mut self, section: Section, line: String) {
        self.sections.entry(section).or_default().push(line);
    }

    /// Lines of one section (empty when the section has none)
    pub fn lines(&self, section: Section) -> &[String] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, section: Section) -> usize {
        self.lines(section).len()
    }

    pub fn breaking_count(&self) -> usize {
        self.count(Section::Breaking)
    }

    pub fn has_breaking_changes(&self) -> bool {
        self.breaking_count() > 0
    }

    /// Whether any record produced a line
    pub fn is_empty(&self) -> bool {
        self.rendered_changes == 0
    }
}

/// Main engine for changelog classification
pub struct ChangelogEngine {
    config: ChangelogConfig,
}

impl ChangelogEngine {
    pub fn new(config: ChangelogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChangelogConfig {
        &self.config
    }

    /// Classify and render every distinct change in the tree
    ///
    /// Structured passes run before the catch-all pass so that a change
    /// reachable from both is rendered once, with its context label.
    pub fn build(&self, tree: &ChangeTree) -> ChangelogResult {
        let mut result = ChangelogResult::new();
        let mut dedup = Deduplicator::new();

        for group in &tree.operations {
            debug!(
                endpoint = %group.label,
                records = group.records.len(),
                "processing operation changes"
            );
            self.process(group.records.iter(), Some(group.label.as_str()), &mut dedup, &mut result);
        }

        for group in &tree.schemas {
            debug!(
                schema = %group.label,
                records = group.records.len(),
                "processing schema changes"
            );
            self.process(group.records.iter(), Some(group.label.as_str()), &mut dedup, &mut result);
        }

        let components = tree.component_changes();
        debug!(records = components.len(), "processing component changes");
        self.process(components.into_iter(), Some(COMPONENTS_CONTEXT), &mut dedup, &mut result);

        let all = tree.all_changes();
        debug!(records = all.len(), "processing remaining changes");
        self.process(all.into_iter(), None, &mut dedup, &mut result);

        debug!(
            distinct = dedup.len(),
            rendered = result.rendered_changes,
            breaking = result.breaking_count(),
            "classification complete"
        );
        result
    }

    fn process<'a>(
        &self,
        records: impl Iterator<Item = &'a ChangeRecord>,
        context: Option<&str>,
        dedup: &mut Deduplicator,
        result: &mut ChangelogResult,
    ) {
        for record in records {
            if self.config.ignores(record) {
                continue;
            }
            if !dedup.observe(record) {
                trace!(property = %record.property, "skipping duplicate change");
                continue;
            }

            let line = format_with_context(record, context);
            if line.is_empty() {
                trace!(property = %record.property, "change renders to nothing");
                continue;
            }

            for section in classify(record).sections() {
                result.push(section, line.clone());
            }
            result.rendered_changes += 1;
        }
    }
}

impl Default for ChangelogEngine {
    fn default() -> Self {
        Self::new(ChangelogConfig::default())
    }
}

//! One-shot changelog run: read both documents, diff them, classify the
//! changes, assemble the document and write it.

use crate::changelog::document::{ChangelogDocument, OutputFormat};
use crate::changelog::engine::{ChangelogConfig, ChangelogEngine};
use crate::diff::{ChangeSource, OpenApiDiff};
use crate::error::ChangelogError;
use crate::spec::Spec;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for a changelog run
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub config: ChangelogConfig,
    pub format: OutputFormat,
    /// Header date; today's local date when `None`
    pub date: Option<String>,
}

/// Drives a changelog run over a `ChangeSource`
pub struct ChangelogGenerator<S: ChangeSource = OpenApiDiff> {
    source: S,
    engine: ChangelogEngine,
    format: OutputFormat,
    date: Option<String>,
}

impl ChangelogGenerator<OpenApiDiff> {
    pub fn new(options: GenerateOptions) -> Self {
        Self::with_source(OpenApiDiff, options)
    }
}

impl<S: ChangeSource> ChangelogGenerator<S> {
    pub fn with_source(source: S, options: GenerateOptions) -> Self {
        Self {
            source,
            engine: ChangelogEngine::new(options.config),
            format: options.format,
            date: options.date,
        }
    }

    fn date(&self) -> Result<String, ChangelogError> {
        let Some(date) = &self.date else {
            let date_format = &self.engine.config().date_format;
            let mut today = String::new();
            write!(today, "{}", chrono::Local::now().format(date_format)).map_err(|_| {
                ChangelogError::Config {
                    reason: format!("invalid date_format `{date_format}`"),
                }
            })?;
            return Ok(today);
        };
        Ok(date.clone())
    }

    /// Builds the changelog document for two parsed documents
    ///
    /// Returns `None` when nothing renderable changed.
    pub fn generate(
        &self,
        previous: &Spec,
        latest: &Spec,
    ) -> Result<Option<ChangelogDocument>, ChangelogError> {
        let tree = self.source.compare(previous, latest)?;
        let total_changes = tree.total_changes();
        if total_changes == 0 {
            return Ok(None);
        }

        let result = self.engine.build(&tree);
        let api_version = self.source.api_version(latest);

        Ok(ChangelogDocument::assemble(
            &self.engine.config().title,
            &api_version,
            &self.date()?,
            total_changes,
            &result,
        ))
    }

    /// Runs the whole pipeline from files to file
    ///
    /// Returns the written path, or `None` when no changelog was produced (in
    /// which case no file is created).
    pub fn run(
        &self,
        latest_path: &Path,
        previous_path: &Path,
        output_path: &Path,
    ) -> Result<Option<PathBuf>, ChangelogError> {
        let latest = Spec::from_path(latest_path)?;
        let previous = Spec::from_path(previous_path)?;

        let Some(document) = self.generate(&previous, &latest)? else {
            info!("no changes detected");
            return Ok(None);
        };

        document.write_to(output_path, self.format)?;
        info!(
            path = %output_path.display(),
            total = document.summary.total_changes,
            breaking = document.summary.breaking_changes,
            "changelog generated"
        );
        Ok(Some(output_path.to_path_buf()))
    }
}

//! Change classification and rendering pipeline
//!
//! Turns a `ChangeTree` into a categorized, human-readable changelog:
//! deduplicate, classify, format, assemble.

pub mod categories;
pub mod classifier;
pub mod dedup;
pub mod document;
pub mod engine;
pub mod formatter;
pub mod types;

pub use categories::Section;
pub use classifier::{Classification, classify};
pub use dedup::Deduplicator;
pub use document::{ChangelogDocument, OutputFormat};
pub use engine::{ChangelogConfig, ChangelogEngine, ChangelogResult};
pub use formatter::{format_change, format_with_context};
pub use types::{ChangeKind, ChangeRecord, ChangeTree, ContextualChangeGroup, DedupKey};

//! Maps change records onto changelog sections
//!
//! The change source's `breaking` hint is noisy, so it is narrowed here to
//! three auditable shapes: an object removal, a property removal, or
//! `required` flipping from `false` to `true`. Endpoint removal is always
//! breaking regardless of the hint.

use crate::changelog::categories::Section;
use crate::changelog::types::{ChangeKind, ChangeRecord};
use serde::{Deserialize, Serialize};

/// Primary bucket of a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeCategory {
    Added,
    Modified,
    Removed,
}

impl ChangeCategory {
    pub fn of(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::ObjectAdded | ChangeKind::PropertyAdded => ChangeCategory::Added,
            ChangeKind::Modified => ChangeCategory::Modified,
            ChangeKind::ObjectRemoved | ChangeKind::PropertyRemoved => ChangeCategory::Removed,
        }
    }

    pub fn section(&self) -> Section {
        match self {
            ChangeCategory::Added => Section::Added,
            ChangeCategory::Modified => Section::Modified,
            ChangeCategory::Removed => Section::Removed,
        }
    }
}

/// Endpoint-level verdict for path-like properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointChange {
    Added,
    Removed,
}

/// Outcome of classifying one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: ChangeCategory,
    /// Authoritative breaking verdict
    pub breaking: bool,
    /// Set when the record adds or removes a whole endpoint path
    pub endpoint: Option<EndpointChange>,
}

impl Classification {
    /// Sections this record is appended to, in append order
    ///
    /// Endpoint changes go to the endpoint sections instead of the primary
    /// bucket. A breaking change lands in `Breaking` as well as its bucket.
    pub fn sections(&self) -> Vec<Section> {
        let mut sections = Vec::with_capacity(2);
        if self.breaking {
            sections.push(Section::Breaking);
        }
        match self.endpoint {
            Some(EndpointChange::Added) => sections.push(Section::NewEndpoints),
            Some(EndpointChange::Removed) => sections.push(Section::RemovedEndpoints),
            None => sections.push(self.category.section()),
        }
        sections
    }
}

/// Whether a record is breaking once the source hint is narrowed
pub fn is_actually_breaking(record: &ChangeRecord) -> bool {
    record.breaking
        && (record.kind.is_removal()
            || (record.property == "required"
                && record.original == "false"
                && record.new == "true"))
}

/// Classifies a single record
pub fn classify(record: &ChangeRecord) -> Classification {
    let category = ChangeCategory::of(record.kind);

    // Mirrors the formatter: a path record that is not a removal reads "added".
    let endpoint = match (record.is_path(), record.kind.is_removal()) {
        (true, true) => Some(EndpointChange::Removed),
        (true, false) => Some(EndpointChange::Added),
        (false, _) => None,
    };

    let breaking = match endpoint {
        Some(EndpointChange::Removed) => true,
        _ => is_actually_breaking(record),
    };

    Classification {
        category,
        breaking,
        endpoint,
    }
}

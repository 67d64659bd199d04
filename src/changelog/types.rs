//! Core types for changelog generation

use serde::{Deserialize, Serialize};

/// The shape of a single difference between two document snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// A whole object (path, schema, parameter, response...) was added
    ObjectAdded,
    /// A whole object was removed
    ObjectRemoved,
    /// A property that was absent now has a value
    PropertyAdded,
    /// A property that had a value is now absent
    PropertyRemoved,
    /// A property changed value
    Modified,
}

impl ChangeKind {
    /// Whether this kind removes something that previously existed
    pub fn is_removal(&self) -> bool {
        matches!(self, ChangeKind::ObjectRemoved | ChangeKind::PropertyRemoved)
    }

    /// Whether this kind introduces something that did not exist
    pub fn is_addition(&self) -> bool {
        matches!(self, ChangeKind::ObjectAdded | ChangeKind::PropertyAdded)
    }
}

/// One atomic difference between two document snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Identifier of the field that changed (`description`, `required`, a path, an `x-` key...)
    pub property: String,
    /// Value before the change; empty when absent
    pub original: String,
    /// Value after the change; empty when absent
    pub new: String,
    /// Shape of the change
    pub kind: ChangeKind,
    /// Breaking hint from the change source. Advisory only.
    pub breaking: bool,
}

impl ChangeRecord {
    pub fn new(
        kind: ChangeKind,
        property: impl Into<String>,
        original: impl Into<String>,
        new: impl Into<String>,
        breaking: bool,
    ) -> Self {
        Self {
            property: property.into(),
            original: original.into(),
            new: new.into(),
            kind,
            breaking,
        }
    }

    /// Identity used to collapse repeated occurrences of the same change
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            kind: self.kind,
            property: self.property.clone(),
            original: self.original.clone(),
            new: self.new.clone(),
        }
    }

    /// Whether the property names an endpoint path (`/users/{id}`)
    pub fn is_path(&self) -> bool {
        self.property.starts_with('/')
    }
}

/// Identity tuple `(kind, property, original, new)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub kind: ChangeKind,
    pub property: String,
    pub original: String,
    pub new: String,
}

/// A named subtree of changes sharing a context label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextualChangeGroup {
    /// Human-readable context (`GET /users`, ``Schema `User` ``)
    pub label: String,
    pub records: Vec<ChangeRecord>,
}

impl ContextualChangeGroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            records: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Change records organized the way the API document is organized
///
/// Groups appear in document traversal order: operations by path (document
/// order) then canonical method order, schemas in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTree {
    /// Document-level records (info, servers, extensions)
    pub document: Vec<ChangeRecord>,
    /// Path-level records (endpoints and operations added or removed)
    pub paths: Vec<ChangeRecord>,
    /// Per-operation groups labelled `"<METHOD> <path>"`
    pub operations: Vec<ContextualChangeGroup>,
    /// Per-schema groups labelled ``"Schema `<name>`"``
    pub schemas: Vec<ContextualChangeGroup>,
    /// Component-level records (schema and other component members added or removed)
    pub components: Vec<ChangeRecord>,
}

impl ChangeTree {
    /// Flattened component view: component-level records followed by every schema record
    pub fn component_changes(&self) -> Vec<&ChangeRecord> {
        self.components
            .iter()
            .chain(self.schemas.iter().flat_map(|g| g.records.iter()))
            .collect()
    }

    /// Every record in the tree, in document order
    pub fn all_changes(&self) -> Vec<&ChangeRecord> {
        self.document
            .iter()
            .chain(self.paths.iter())
            .chain(self.operations.iter().flat_map(|g| g.records.iter()))
            .chain(self.component_changes())
            .collect()
    }

    /// Total number of raw records reported by the change source
    pub fn total_changes(&self) -> usize {
        self.all_changes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_key_ignores_breaking_hint() {
        let a = ChangeRecord::new(ChangeKind::Modified, "type", "string", "integer", true);
        let b = ChangeRecord::new(ChangeKind::Modified, "type", "string", "integer", false);
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_dedup_key_distinguishes_kind() {
        let added = ChangeRecord::new(ChangeKind::PropertyAdded, "x-internal", "", "true", false);
        let object = ChangeRecord::new(ChangeKind::ObjectAdded, "x-internal", "", "true", false);
        assert_ne!(added.dedup_key(), object.dedup_key());
    }

    #[test]
    fn test_tree_total_counts_schema_records_once() {
        let mut schema = ContextualChangeGroup::new("Schema `User`");
        schema.records.push(ChangeRecord::new(
            ChangeKind::ObjectAdded,
            "properties",
            "",
            "email",
            false,
        ));
        let tree = ChangeTree {
            paths: vec![ChangeRecord::new(
                ChangeKind::ObjectAdded,
                "/users",
                "",
                "/users",
                false,
            )],
            schemas: vec![schema],
            ..Default::default()
        };

        assert_eq!(tree.component_changes().len(), 1);
        assert_eq!(tree.total_changes(), 2);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_empty_tree() {
        assert!(ChangeTree::default().is_empty());
    }
}

//! Structural diff of two canonical API documents
//!
//! `OpenApiDiff` walks the previous and latest canonical models side by side
//! and emits `ChangeRecord`s into a `ChangeTree` that mirrors the document:
//! operation records under `"<METHOD> <path>"`, schema records under
//! ``"Schema `<name>`"``, everything else at document, path or component
//! level. The `breaking` flag it sets is only a hint.

use crate::canonical::{
    COMPONENT_GROUPS, CanonicalDocument, CanonicalOperation, CanonicalParameter,
    CanonicalPathItem, CanonicalSchema, METHODS,
};
use crate::changelog::types::{ChangeKind, ChangeRecord, ChangeTree, ContextualChangeGroup};
use crate::error::ChangelogError;
use crate::spec::Spec;
use tracing::debug;

/// Supplier of change records for a pair of documents
pub trait ChangeSource {
    /// Compares two documents and returns their changes organized as a tree
    fn compare(&self, previous: &Spec, latest: &Spec) -> Result<ChangeTree, ChangelogError>;

    /// API version of a document, `"Unknown"` when it cannot be determined
    fn api_version(&self, spec: &Spec) -> String;
}

/// Structural differ for OpenAPI / Swagger documents
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenApiDiff;

impl ChangeSource for OpenApiDiff {
    fn compare(&self, previous: &Spec, latest: &Spec) -> Result<ChangeTree, ChangelogError> {
        if previous.fingerprint == latest.fingerprint {
            debug!("documents share a fingerprint, skipping structural diff");
            return Ok(ChangeTree::default());
        }
        Ok(diff_documents(&previous.document, &latest.document))
    }

    fn api_version(&self, spec: &Spec) -> String {
        spec.api_version()
    }
}

//==============================================================================
// Record helpers
//==============================================================================

fn push(
    out: &mut Vec<ChangeRecord>,
    kind: ChangeKind,
    property: &str,
    original: &str,
    new: &str,
    breaking: bool,
) {
    out.push(ChangeRecord::new(kind, property, original, new, breaking));
}

/// Optional text value: modified, added or removed
fn compare_text(
    out: &mut Vec<ChangeRecord>,
    property: &str,
    previous: Option<&str>,
    latest: Option<&str>,
    breaking: bool,
) {
    match (previous, latest) {
        (Some(a), Some(b)) if a != b => push(out, ChangeKind::Modified, property, a, b, breaking),
        (None, Some(b)) => push(out, ChangeKind::PropertyAdded, property, "", b, breaking),
        (Some(a), None) => push(out, ChangeKind::PropertyRemoved, property, a, "", breaking),
        _ => {}
    }
}

/// Boolean flag flip, hinted breaking only when it turns on
fn compare_flag(
    out: &mut Vec<ChangeRecord>,
    property: &str,
    previous: bool,
    latest: bool,
    breaking_when_set: bool,
) {
    if previous != latest {
        push(
            out,
            ChangeKind::Modified,
            property,
            &previous.to_string(),
            &latest.to_string(),
            latest && breaking_when_set,
        );
    }
}

fn lookup<'a, V>(pairs: &'a [(String, V)], key: &str) -> Option<&'a V> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

fn compare_extensions(
    out: &mut Vec<ChangeRecord>,
    previous: &[(String, String)],
    latest: &[(String, String)],
) {
    for (key, old) in previous {
        if lookup(latest, key).is_none() {
            push(out, ChangeKind::PropertyRemoved, key, old, "", false);
        }
    }
    for (key, new) in latest {
        let old = lookup(previous, key).map(String::as_str);
        compare_text(out, key, old, Some(new.as_str()), false);
    }
}

/// Named members of a collection: removed members first, then added ones
fn compare_members(
    out: &mut Vec<ChangeRecord>,
    property: &str,
    previous: &[String],
    latest: &[String],
) {
    for name in previous.iter().filter(|n| !latest.contains(n)) {
        push(out, ChangeKind::ObjectRemoved, property, name, "", true);
    }
    for name in latest.iter().filter(|n| !previous.contains(n)) {
        push(out, ChangeKind::ObjectAdded, property, "", name, false);
    }
}

//==============================================================================
// Document walk
//==============================================================================

/// Computes the change tree between two canonical documents
pub fn diff_documents(previous: &CanonicalDocument, latest: &CanonicalDocument) -> ChangeTree {
    let mut tree = ChangeTree::default();

    compare_text(
        &mut tree.document,
        "title",
        previous.title.as_deref(),
        latest.title.as_deref(),
        false,
    );
    compare_text(
        &mut tree.document,
        "description",
        previous.description.as_deref(),
        latest.description.as_deref(),
        false,
    );
    compare_text(
        &mut tree.document,
        "version",
        previous.version.as_deref(),
        latest.version.as_deref(),
        false,
    );
    compare_servers(&mut tree.document, &previous.servers, &latest.servers);
    compare_extensions(&mut tree.document, &previous.extensions, &latest.extensions);

    for (path, latest_item) in &latest.paths {
        match lookup(&previous.paths, path) {
            Some(previous_item) => compare_path_item(&mut tree, path, previous_item, latest_item),
            None => push(&mut tree.paths, ChangeKind::ObjectAdded, path, "", path, false),
        }
    }
    for (path, _) in &previous.paths {
        if lookup(&latest.paths, path).is_none() {
            push(&mut tree.paths, ChangeKind::ObjectRemoved, path, path, "", true);
        }
    }

    compare_components(&mut tree, previous, latest);

    debug!(
        operations = tree.operations.len(),
        schemas = tree.schemas.len(),
        total = tree.total_changes(),
        "structural diff complete"
    );
    tree
}

fn compare_servers(out: &mut Vec<ChangeRecord>, previous: &[String], latest: &[String]) {
    for i in 0..previous.len().max(latest.len()) {
        match (previous.get(i), latest.get(i)) {
            (Some(a), Some(b)) if a != b => push(out, ChangeKind::Modified, "url", a, b, false),
            (None, Some(b)) => push(out, ChangeKind::ObjectAdded, "servers", "", b, false),
            (Some(a), None) => push(out, ChangeKind::ObjectRemoved, "servers", a, "", true),
            _ => {}
        }
    }
}

fn compare_path_item(
    tree: &mut ChangeTree,
    path: &str,
    previous: &CanonicalPathItem,
    latest: &CanonicalPathItem,
) {
    for method in METHODS {
        let endpoint = format!("{} {}", method.to_uppercase(), path);
        match (previous.operation(method), latest.operation(method)) {
            (Some(old), Some(new)) => {
                let mut group = ContextualChangeGroup::new(endpoint);
                compare_operation(&mut group.records, old, new);
                if !group.is_empty() {
                    tree.operations.push(group);
                }
            }
            (None, Some(_)) => {
                push(&mut tree.paths, ChangeKind::ObjectAdded, method, "", &endpoint, false)
            }
            (Some(_), None) => {
                push(&mut tree.paths, ChangeKind::ObjectRemoved, method, &endpoint, "", true)
            }
            (None, None) => {}
        }
    }
    compare_extensions(&mut tree.paths, &previous.extensions, &latest.extensions);
}

fn compare_operation(
    out: &mut Vec<ChangeRecord>,
    previous: &CanonicalOperation,
    latest: &CanonicalOperation,
) {
    compare_text(out, "summary", previous.summary.as_deref(), latest.summary.as_deref(), false);
    compare_text(
        out,
        "description",
        previous.description.as_deref(),
        latest.description.as_deref(),
        false,
    );
    compare_text(
        out,
        "operationId",
        previous.operation_id.as_deref(),
        latest.operation_id.as_deref(),
        true,
    );
    compare_flag(out, "deprecated", previous.deprecated, latest.deprecated, false);

    compare_parameters(out, &previous.parameters, &latest.parameters);

    match (&previous.request_body, &latest.request_body) {
        (Some(old), Some(new)) => {
            compare_flag(out, "required", old.required, new.required, true);
            compare_text(
                out,
                "description",
                old.description.as_deref(),
                new.description.as_deref(),
                false,
            );
            compare_text(out, "$ref", old.reference.as_deref(), new.reference.as_deref(), true);
        }
        (None, Some(new)) => push(
            out,
            ChangeKind::ObjectAdded,
            "requestBody",
            "",
            if new.required { "required" } else { "optional" },
            new.required,
        ),
        (Some(old), None) => push(
            out,
            ChangeKind::ObjectRemoved,
            "requestBody",
            if old.required { "required" } else { "optional" },
            "",
            true,
        ),
        (None, None) => {}
    }

    for (code, _) in &previous.responses {
        if lookup(&latest.responses, code).is_none() {
            push(out, ChangeKind::ObjectRemoved, "codes", code, "", true);
        }
    }
    for (code, new) in &latest.responses {
        match lookup(&previous.responses, code) {
            Some(old) => {
                compare_text(
                    out,
                    "description",
                    old.description.as_deref(),
                    new.description.as_deref(),
                    false,
                );
                compare_text(out, "$ref", old.reference.as_deref(), new.reference.as_deref(), true);
            }
            None => push(out, ChangeKind::ObjectAdded, "codes", "", code, false),
        }
    }

    compare_extensions(out, &previous.extensions, &latest.extensions);
}

fn compare_parameters(
    out: &mut Vec<ChangeRecord>,
    previous: &[CanonicalParameter],
    latest: &[CanonicalParameter],
) {
    for old in previous {
        if !latest.iter().any(|p| p.same_identity(old)) {
            push(out, ChangeKind::ObjectRemoved, "parameters", &old.name, "", true);
        }
    }
    for new in latest {
        match previous.iter().find(|p| p.same_identity(new)) {
            Some(old) => {
                compare_flag(out, "required", old.required, new.required, true);
                compare_flag(out, "deprecated", old.deprecated, new.deprecated, false);
                compare_text(
                    out,
                    "description",
                    old.description.as_deref(),
                    new.description.as_deref(),
                    false,
                );
                if let (Some(a), Some(b)) = (&old.schema, &new.schema) {
                    compare_schema(out, a, b);
                }
            }
            None => push(out, ChangeKind::ObjectAdded, "parameters", "", &new.name, new.required),
        }
    }
}

fn compare_schema(
    out: &mut Vec<ChangeRecord>,
    previous: &CanonicalSchema,
    latest: &CanonicalSchema,
) {
    compare_text(out, "type", previous.schema_type.as_deref(), latest.schema_type.as_deref(), true);
    compare_text(out, "format", previous.format.as_deref(), latest.format.as_deref(), true);
    compare_text(
        out,
        "description",
        previous.description.as_deref(),
        latest.description.as_deref(),
        false,
    );
    compare_text(out, "$ref", previous.reference.as_deref(), latest.reference.as_deref(), true);
    compare_flag(out, "deprecated", previous.deprecated, latest.deprecated, false);

    for (name, _) in &previous.properties {
        if latest.property(name).is_none() {
            push(out, ChangeKind::ObjectRemoved, "properties", name, "", true);
        }
    }
    for (name, new) in &latest.properties {
        let Some(old) = previous.property(name) else {
            push(out, ChangeKind::ObjectAdded, "properties", "", name, false);
            continue;
        };
        compare_flag(out, "required", previous.is_required(name), latest.is_required(name), true);
        compare_schema(out, old, new);
    }

    if let (Some(old), Some(new)) = (&previous.items, &latest.items) {
        compare_schema(out, old, new);
    }

    compare_extensions(out, &previous.extensions, &latest.extensions);
}

fn compare_components(
    tree: &mut ChangeTree,
    previous: &CanonicalDocument,
    latest: &CanonicalDocument,
) {
    let old = &previous.components;
    let new = &latest.components;

    let old_names: Vec<String> = old.schemas.iter().map(|(n, _)| n.clone()).collect();
    let new_names: Vec<String> = new.schemas.iter().map(|(n, _)| n.clone()).collect();
    compare_members(&mut tree.components, "schemas", &old_names, &new_names);

    for (name, latest_schema) in &new.schemas {
        if let Some(previous_schema) = old.schema(name) {
            let mut group = ContextualChangeGroup::new(format!("Schema `{name}`"));
            compare_schema(&mut group.records, previous_schema, latest_schema);
            if !group.is_empty() {
                tree.schemas.push(group);
            }
        }
    }

    for group in COMPONENT_GROUPS {
        compare_members(&mut tree.components, group, old.members(group), new.members(group));
    }
}

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

//==============================================================================
// Structs for Semantic Comparison
//==============================================================================

// Keyed collections are ordered `Vec`s of `(key, value)` pairs so the diff can
// walk them in document order. They serialize as sorted maps, which keeps the
// fingerprint independent of key order.

#[allow(clippy::ptr_arg)]
fn sorted_pairs<S, V>(pairs: &Vec<(String, V)>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    pairs
        .iter()
        .map(|(k, v)| (k.as_str(), v))
        .collect::<BTreeMap<_, _>>()
        .serialize(serializer)
}

#[allow(clippy::ptr_arg)]
fn sorted_names<S>(names: &Vec<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    names.iter().collect::<BTreeSet<_>>().serialize(serializer)
}

#[allow(clippy::ptr_arg)]
fn sorted_groups<S>(groups: &Vec<(String, Vec<String>)>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    groups
        .iter()
        .map(|(g, members)| (g.as_str(), members.iter().collect::<BTreeSet<_>>()))
        .collect::<BTreeMap<_, _>>()
        .serialize(serializer)
}

/// HTTP methods in canonical traversal order.
pub const METHODS: [&str; 8] = [
    "get", "post", "put", "delete", "patch", "options", "head", "trace",
];

/// Named component groups reported by member name only.
pub const COMPONENT_GROUPS: [&str; 8] = [
    "parameters",
    "responses",
    "examples",
    "requestBodies",
    "headers",
    "securitySchemes",
    "links",
    "callbacks",
];

/// Represents the semantically significant content of an API document.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct CanonicalDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_pairs")]
    pub paths: Vec<(String, CanonicalPathItem)>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_pairs")]
    pub extensions: Vec<(String, String)>,
    pub components: CanonicalComponents,
}

/// Represents one path entry and its operations.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct CanonicalPathItem {
    /// Operations keyed by lower-case method, in `METHODS` order.
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_pairs")]
    pub operations: Vec<(String, CanonicalOperation)>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_pairs")]
    pub extensions: Vec<(String, String)>,
}

impl CanonicalPathItem {
    pub fn operation(&self, method: &str) -> Option<&CanonicalOperation> {
        self.operations
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, op)| op)
    }
}

/// Represents a single operation.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct CanonicalOperation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<CanonicalParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<CanonicalRequestBody>,
    /// Status code → response.
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_pairs")]
    pub responses: Vec<(String, CanonicalResponse)>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_pairs")]
    pub extensions: Vec<(String, String)>,
}

/// Represents an operation parameter.
///
/// Identity is `(name, location)`. A `$ref` parameter uses the reference as
/// its name and `ref` as its location.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct CanonicalParameter {
    pub name: String,
    pub location: String,
    pub required: bool,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<CanonicalSchema>,
}

impl CanonicalParameter {
    pub fn same_identity(&self, other: &CanonicalParameter) -> bool {
        self.name == other.name && self.location == other.location
    }
}

/// Represents a request body.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct CanonicalRequestBody {
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Represents a response.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct CanonicalResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// Represents a schema, recursively.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct CanonicalSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    pub deprecated: bool,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_names")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_pairs")]
    pub properties: Vec<(String, CanonicalSchema)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<CanonicalSchema>>,
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_pairs")]
    pub extensions: Vec<(String, String)>,
}

impl CanonicalSchema {
    pub fn property(&self, name: &str) -> Option<&CanonicalSchema> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Represents the `components` section.
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct CanonicalComponents {
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_pairs")]
    pub schemas: Vec<(String, CanonicalSchema)>,
    /// Group name → member names, for every group in `COMPONENT_GROUPS`
    /// that the document defines.
    #[serde(skip_serializing_if = "Vec::is_empty", serialize_with = "sorted_groups")]
    pub groups: Vec<(String, Vec<String>)>,
}

impl CanonicalComponents {
    pub fn schema(&self, name: &str) -> Option<&CanonicalSchema> {
        self.schemas
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    pub fn members(&self, group: &str) -> &[String] {
        self.groups
            .iter()
            .find(|(g, _)| g == group)
            .map(|(_, m)| m.as_slice())
            .unwrap_or(&[])
    }
}

//! Natural-language rendering of change records
//!
//! Each well-known property has its own sentence; everything else goes
//! through the extension or generic rules. An empty string means the change
//! is not worth a line and must be dropped by the caller.

use crate::changelog::types::ChangeRecord;

/// Property rule selected for a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyRule {
    /// Named member added to or removed from a collection
    Member(MemberKind),
    Deprecated,
    Version,
    Description,
    Summary,
    Reference,
    /// `url`, `type` and `format`: only rendered when both values exist
    ValueChange(&'static str),
    Required,
    /// Property is an endpoint path (`/pets/{id}`)
    Path,
    /// Property is an `x-` extension key
    Extension,
    Generic,
}

/// Collections whose members are reported by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    ResponseCode,
    Parameter,
    Property,
    Schema,
}

impl MemberKind {
    fn noun(&self) -> &'static str {
        match self {
            MemberKind::ResponseCode => "Response code",
            MemberKind::Parameter => "Parameter",
            MemberKind::Property => "Property",
            MemberKind::Schema => "Schema",
        }
    }
}

impl PropertyRule {
    pub fn of(property: &str) -> Self {
        match property {
            "codes" => PropertyRule::Member(MemberKind::ResponseCode),
            "parameters" => PropertyRule::Member(MemberKind::Parameter),
            "properties" => PropertyRule::Member(MemberKind::Property),
            "schemas" => PropertyRule::Member(MemberKind::Schema),
            "deprecated" => PropertyRule::Deprecated,
            "version" => PropertyRule::Version,
            "description" => PropertyRule::Description,
            "summary" => PropertyRule::Summary,
            "$ref" | "reference" => PropertyRule::Reference,
            "url" => PropertyRule::ValueChange("URL"),
            "type" => PropertyRule::ValueChange("Type"),
            "format" => PropertyRule::ValueChange("Format"),
            "required" => PropertyRule::Required,
            p if p.starts_with('/') => PropertyRule::Path,
            p if p.starts_with("x-") => PropertyRule::Extension,
            _ => PropertyRule::Generic,
        }
    }
}

/// Flattens a value for single-line display. Never truncates.
fn flatten(value: &str) -> String {
    value.replace('\n', " ")
}

/// Renders one record as a sentence, or an empty string to suppress it
pub fn format_change(record: &ChangeRecord) -> String {
    let property = record.property.as_str();
    let original = record.original.as_str();
    let new = record.new.as_str();

    match PropertyRule::of(property) {
        PropertyRule::Member(kind) => {
            if !new.is_empty() {
                format!("{} `{}` added", kind.noun(), new)
            } else if !original.is_empty() {
                format!("{} `{}` removed", kind.noun(), original)
            } else {
                String::new()
            }
        }
        PropertyRule::Deprecated => {
            if new == "true" {
                "Marked as deprecated".to_string()
            } else {
                "No longer deprecated".to_string()
            }
        }
        PropertyRule::Version => {
            format!("API version updated from `{original}` to `{new}`")
        }
        PropertyRule::Description => format!(
            "Description updated:\n  - Old: {}\n  - New: {}",
            flatten(original),
            flatten(new)
        ),
        PropertyRule::Summary => format!(
            "Summary updated from '{}' to '{}'",
            flatten(original),
            flatten(new)
        ),
        PropertyRule::Reference => match (original.is_empty(), new.is_empty()) {
            (false, false) if original == new => String::new(),
            (false, false) => format!("Reference changed from `{original}` to `{new}`"),
            (_, false) => format!("Reference set to `{new}`"),
            _ => format!("Reference `{original}` removed"),
        },
        PropertyRule::ValueChange(label) => {
            if !original.is_empty() && !new.is_empty() {
                format!("{label} changed from `{original}` to `{new}`")
            } else {
                String::new()
            }
        }
        PropertyRule::Required => match (original, new) {
            ("false", "true") => "Now required".to_string(),
            ("true", "false") => "No longer required".to_string(),
            _ => String::new(),
        },
        PropertyRule::Path => {
            if record.kind.is_removal() {
                format!("Endpoint `{property}` removed")
            } else {
                format!("Endpoint `{property}` added")
            }
        }
        PropertyRule::Extension => match (original.is_empty(), new.is_empty()) {
            (false, false) => format!("Extension `{property}` modified"),
            (true, false) => format!("Extension `{property}` added"),
            _ => format!("Extension `{property}` removed"),
        },
        PropertyRule::Generic => match (original.is_empty(), new.is_empty()) {
            (false, false) if original == new => String::new(),
            (false, false) => format!(
                "`{}` changed from '{}' to '{}'",
                property,
                flatten(original),
                flatten(new)
            ),
            (true, false) => format!("`{}` set to '{}'", property, flatten(new)),
            (false, true) => format!("`{}` removed (was '{}')", property, flatten(original)),
            (true, true) => format!("`{property}` modified"),
        },
    }
}

/// Renders a record and prefixes its context label
///
/// The label is added as `**<context>**: ` unless the sentence already
/// mentions it. Suppressed records stay suppressed.
pub fn format_with_context(record: &ChangeRecord, context: Option<&str>) -> String {
    let description = format_change(record);
    if description.is_empty() {
        return description;
    }

    match context {
        Some(ctx) if !ctx.is_empty() && !description.contains(ctx) => {
            format!("**{ctx}**: {description}")
        }
        _ => description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::types::ChangeKind;

    fn modified(property: &str, original: &str, new: &str) -> ChangeRecord {
        ChangeRecord::new(ChangeKind::Modified, property, original, new, false)
    }

    #[test]
    fn test_member_rules() {
        let added = ChangeRecord::new(ChangeKind::ObjectAdded, "codes", "", "201", false);
        assert_eq!(format_change(&added), "Response code `201` added");

        let removed = ChangeRecord::new(ChangeKind::ObjectRemoved, "parameters", "limit", "", true);
        assert_eq!(format_change(&removed), "Parameter `limit` removed");

        let property = ChangeRecord::new(ChangeKind::ObjectAdded, "properties", "", "email", false);
        assert_eq!(format_change(&property), "Property `email` added");

        let schema = ChangeRecord::new(ChangeKind::ObjectRemoved, "schemas", "Legacy", "", true);
        assert_eq!(format_change(&schema), "Schema `Legacy` removed");

        assert_eq!(format_change(&modified("schemas", "", "")), "");
    }

    #[test]
    fn test_deprecated() {
        assert_eq!(format_change(&modified("deprecated", "false", "true")), "Marked as deprecated");
        assert_eq!(format_change(&modified("deprecated", "true", "false")), "No longer deprecated");
        assert_eq!(format_change(&modified("deprecated", "true", "")), "No longer deprecated");
    }

    #[test]
    fn test_version() {
        assert_eq!(
            format_change(&modified("version", "1.0.0", "1.1.0")),
            "API version updated from `1.0.0` to `1.1.0`"
        );
    }

    #[test]
    fn test_description_flattens_newlines_without_truncation() {
        let text = format_change(&modified("description", "Old\ntext", "New text"));
        assert_eq!(text, "Description updated:\n  - Old: Old text\n  - New: New text");

        let long = "word ".repeat(500);
        let text = format_change(&modified("description", "short", &long));
        assert!(text.ends_with(&long));
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            format_change(&modified("summary", "List\npets", "List all pets")),
            "Summary updated from 'List pets' to 'List all pets'"
        );
    }

    #[test]
    fn test_reference() {
        let a = "#/components/schemas/Pet";
        let b = "#/components/schemas/PetV2";
        assert_eq!(
            format_change(&modified("$ref", a, b)),
            format!("Reference changed from `{a}` to `{b}`")
        );
        assert_eq!(format_change(&modified("reference", a, a)), "");
        assert_eq!(format_change(&modified("$ref", "", b)), format!("Reference set to `{b}`"));
        assert_eq!(format_change(&modified("$ref", a, "")), format!("Reference `{a}` removed"));
    }

    #[test]
    fn test_value_changes_need_both_sides() {
        assert_eq!(
            format_change(&modified("type", "string", "integer")),
            "Type changed from `string` to `integer`"
        );
        assert_eq!(
            format_change(&modified("format", "int32", "int64")),
            "Format changed from `int32` to `int64`"
        );
        assert_eq!(
            format_change(&modified("url", "https://a", "https://b")),
            "URL changed from `https://a` to `https://b`"
        );
        assert_eq!(format_change(&modified("type", "", "string")), "");
        assert_eq!(format_change(&modified("url", "https://a", "")), "");
    }

    #[test]
    fn test_required() {
        assert_eq!(format_change(&modified("required", "false", "true")), "Now required");
        assert_eq!(format_change(&modified("required", "true", "false")), "No longer required");
        assert_eq!(format_change(&modified("required", "", "email")), "");
    }

    #[test]
    fn test_paths() {
        let added =
            ChangeRecord::new(ChangeKind::ObjectAdded, "/pets/{id}", "", "/pets/{id}", false);
        assert_eq!(format_change(&added), "Endpoint `/pets/{id}` added");

        let removed = ChangeRecord::new(ChangeKind::ObjectRemoved, "/pets", "/pets", "", true);
        assert_eq!(format_change(&removed), "Endpoint `/pets` removed");
    }

    #[test]
    fn test_extensions() {
        let cases = [
            (("10", "20"), "Extension `x-rate-limit` modified"),
            (("", "20"), "Extension `x-rate-limit` added"),
            (("10", ""), "Extension `x-rate-limit` removed"),
        ];
        for ((original, new), expected) in cases {
            assert_eq!(format_change(&modified("x-rate-limit", original, new)), expected);
        }
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(format_change(&modified("operationId", "same", "same")), "");
        assert_eq!(
            format_change(&modified("operationId", "listPets", "getPets")),
            "`operationId` changed from 'listPets' to 'getPets'"
        );
        assert_eq!(
            format_change(&modified("title", "", "Pet\nStore")),
            "`title` set to 'Pet Store'"
        );
        assert_eq!(format_change(&modified("title", "Pets", "")), "`title` removed (was 'Pets')");
        assert_eq!(format_change(&modified("title", "", "")), "`title` modified");
    }

    #[test]
    fn test_context_prefix() {
        let record = ChangeRecord::new(ChangeKind::ObjectAdded, "codes", "", "201", false);
        assert_eq!(
            format_with_context(&record, Some("POST /pets")),
            "**POST /pets**: Response code `201` added"
        );
        assert_eq!(format_with_context(&record, None), "Response code `201` added");
        assert_eq!(format_with_context(&record, Some("")), "Response code `201` added");
    }

    #[test]
    fn test_context_not_repeated() {
        let record = ChangeRecord::new(ChangeKind::ObjectAdded, "schemas", "", "Pet", false);
        assert_eq!(format_with_context(&record, Some("Pet")), "Schema `Pet` added");
    }

    #[test]
    fn test_context_keeps_suppression() {
        let record = modified("required", "", "");
        assert_eq!(format_with_context(&record, Some("GET /pets")), "");
    }
}

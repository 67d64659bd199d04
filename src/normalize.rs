//! Converts a raw YAML/JSON API document (`serde_yaml::Value`) into the
//! simplified, serializable `CanonicalDocument` representation.

use crate::canonical::{
    COMPONENT_GROUPS, CanonicalComponents, CanonicalDocument, CanonicalOperation,
    CanonicalParameter, CanonicalPathItem, CanonicalRequestBody, CanonicalResponse,
    CanonicalSchema, METHODS,
};
use serde_yaml::Value;

/// Renders any value as display text. Compound values become compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => render_value(&tagged.value),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    value.filter(|v| !v.is_null()).map(render_value)
}

fn flag(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

/// Key/value entries of a mapping in document order. Non-mappings yield nothing.
fn entries(value: Option<&Value>) -> Vec<(String, &Value)> {
    match value.and_then(Value::as_mapping) {
        Some(mapping) => mapping
            .iter()
            .map(|(k, v)| (render_value(k), v))
            .collect(),
        None => Vec::new(),
    }
}

fn extensions(value: &Value) -> Vec<(String, String)> {
    entries(Some(value))
        .into_iter()
        .filter(|(k, _)| k.starts_with("x-"))
        .map(|(k, v)| (k, render_value(v)))
        .collect()
}

pub fn normalize_document(root: &Value) -> CanonicalDocument {
    let info = root.get("info");

    let servers = root
        .get("servers")
        .and_then(Value::as_sequence)
        .map(|seq| seq.iter().filter_map(|s| text(s.get("url"))).collect())
        .unwrap_or_default();

    let paths = entries(root.get("paths"))
        .into_iter()
        .map(|(path, item)| (path, normalize_path_item(item)))
        .collect();

    CanonicalDocument {
        title: text(info.and_then(|i| i.get("title"))),
        description: text(info.and_then(|i| i.get("description"))),
        version: text(info.and_then(|i| i.get("version"))),
        servers,
        paths,
        extensions: extensions(root),
        components: normalize_components(root),
    }
}

fn normalize_path_item(item: &Value) -> CanonicalPathItem {
    let shared: Vec<CanonicalParameter> = item
        .get("parameters")
        .and_then(Value::as_sequence)
        .map(|seq| seq.iter().map(normalize_parameter).collect())
        .unwrap_or_default();

    let operations = METHODS
        .iter()
        .filter_map(|method| {
            item.get(*method)
                .map(|op| (method.to_string(), normalize_operation(op, &shared)))
        })
        .collect();

    CanonicalPathItem {
        operations,
        extensions: extensions(item),
    }
}

fn normalize_operation(op: &Value, shared: &[CanonicalParameter]) -> CanonicalOperation {
    let mut parameters: Vec<CanonicalParameter> = op
        .get("parameters")
        .and_then(Value::as_sequence)
        .map(|seq| seq.iter().map(normalize_parameter).collect())
        .unwrap_or_default();

    // Path-level parameters apply unless the operation overrides them.
    for param in shared {
        if !parameters.iter().any(|p| p.same_identity(param)) {
            parameters.push(param.clone());
        }
    }

    let request_body = op.get("requestBody").map(|body| CanonicalRequestBody {
        required: flag(body.get("required")),
        description: text(body.get("description")),
        reference: text(body.get("$ref")),
    });

    let responses = entries(op.get("responses"))
        .into_iter()
        .map(|(code, response)| {
            (
                code,
                CanonicalResponse {
                    description: text(response.get("description")),
                    reference: text(response.get("$ref")),
                },
            )
        })
        .collect();

    CanonicalOperation {
        operation_id: text(op.get("operationId")),
        summary: text(op.get("summary")),
        description: text(op.get("description")),
        deprecated: flag(op.get("deprecated")),
        parameters,
        request_body,
        responses,
        extensions: extensions(op),
    }
}

fn normalize_parameter(param: &Value) -> CanonicalParameter {
    if let Some(reference) = text(param.get("$ref")) {
        return CanonicalParameter {
            name: reference,
            location: "ref".to_string(),
            ..Default::default()
        };
    }

    CanonicalParameter {
        name: text(param.get("name")).unwrap_or_default(),
        location: text(param.get("in")).unwrap_or_default(),
        required: flag(param.get("required")),
        deprecated: flag(param.get("deprecated")),
        description: text(param.get("description")),
        schema: param.get("schema").map(normalize_schema),
    }
}

pub fn normalize_schema(schema: &Value) -> CanonicalSchema {
    let required = schema
        .get("required")
        .and_then(Value::as_sequence)
        .map(|seq| seq.iter().filter_map(|r| r.as_str().map(str::to_string)).collect())
        .unwrap_or_default();

    let properties = entries(schema.get("properties"))
        .into_iter()
        .map(|(name, prop)| (name, normalize_schema(prop)))
        .collect();

    CanonicalSchema {
        schema_type: text(schema.get("type")),
        format: text(schema.get("format")),
        description: text(schema.get("description")),
        reference: text(schema.get("$ref")),
        deprecated: flag(schema.get("deprecated")),
        required,
        properties,
        items: schema.get("items").map(|i| Box::new(normalize_schema(i))),
        extensions: extensions(schema),
    }
}

fn normalize_components(root: &Value) -> CanonicalComponents {
    let components = root.get("components");

    // Swagger 2.0 keeps schemas under `definitions`.
    let schema_map = components
        .and_then(|c| c.get("schemas"))
        .or_else(|| root.get("definitions"));

    let schemas = entries(schema_map)
        .into_iter()
        .map(|(name, schema)| (name, normalize_schema(schema)))
        .collect();

    let groups = COMPONENT_GROUPS
        .iter()
        .filter_map(|group| {
            components.and_then(|c| c.get(*group)).map(|members| {
                let names = entries(Some(members)).into_iter().map(|(n, _)| n).collect();
                (group.to_string(), names)
            })
        })
        .collect();

    CanonicalComponents { schemas, groups }
}

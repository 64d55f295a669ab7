use super::types::{ApiDescription, Operation, ParamType, ParameterDeclaration, ParameterLocation};
use crate::error::SpecParseError;
use http::Method;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// HTTP verbs that may key an operation inside a path item.
const METHODS: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

/// Path-item keys that are not operations.
const PATH_ITEM_FIELDS: [&str; 5] = ["summary", "description", "servers", "parameters", "$ref"];

/// Guards against reference cycles such as `A -> B -> A`.
const MAX_REF_DEPTH: usize = 8;

/// Parse description text as JSON, falling back to YAML.
pub fn parse_document(raw: &str) -> Result<Value, SpecParseError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str::<Value>(raw).map_err(|yaml_err| {
            let message = if raw.trim_start().starts_with('{') {
                json_err.to_string()
            } else {
                yaml_err.to_string()
            };
            SpecParseError::Syntax { message }
        }),
    }
}

/// Parse description text into an [`ApiDescription`].
pub fn load(raw: &str) -> Result<ApiDescription, SpecParseError> {
    let doc = parse_document(raw)?;
    load_value(&doc)
}

/// Build an [`ApiDescription`] from an already parsed document.
///
/// # Errors
///
/// Returns [`SpecParseError`] when the document lacks a `paths` object, an
/// operation or parameter is malformed, a `$ref` cannot be resolved, or the
/// same method and path are declared twice.
pub fn load_value(doc: &Value) -> Result<ApiDescription, SpecParseError> {
    let root = doc
        .as_object()
        .ok_or_else(|| SpecParseError::invalid("#", "document root must be an object"))?;

    let paths = match root.get("paths") {
        Some(Value::Object(paths)) => paths,
        Some(_) => return Err(SpecParseError::invalid("#/paths", "must be an object")),
        None => return Err(SpecParseError::MissingPaths),
    };

    let base_path = extract_base_path(root);
    let mut operations = Vec::new();
    let mut seen: HashSet<(Method, String)> = HashSet::new();

    for (path, item) in paths {
        if !path.starts_with('/') {
            return Err(SpecParseError::MissingPath { path: path.clone() });
        }
        let item_location = format!("#/paths/{path}");
        let item = item
            .as_object()
            .ok_or_else(|| SpecParseError::invalid(&item_location, "path item must be an object"))?;

        let path_level = extract_parameters(doc, item.get("parameters"), &item_location)?;

        for (key, op_value) in item {
            let lower = key.to_ascii_lowercase();
            if !METHODS.contains(&lower.as_str()) {
                if PATH_ITEM_FIELDS.contains(&lower.as_str()) || key.starts_with("x-") {
                    continue;
                }
                return Err(SpecParseError::MissingMethod {
                    path: path.clone(),
                    key: key.clone(),
                });
            }

            let method = Method::from_bytes(lower.to_ascii_uppercase().as_bytes())
                .map_err(|_| SpecParseError::invalid(&item_location, format!("bad method `{key}`")))?;

            if !seen.insert((method.clone(), normalize_path(path))) {
                return Err(SpecParseError::DuplicateOperation {
                    method: method.to_string(),
                    path: path.clone(),
                });
            }

            let location = format!("{item_location}/{lower}");
            let operation = op_value
                .as_object()
                .ok_or_else(|| SpecParseError::invalid(&location, "operation must be an object"))?;

            let op = extract_operation(doc, path, method, operation, &path_level, &location)?;
            debug!(
                method = %op.method,
                path = %op.path,
                operation_id = ?op.operation_id,
                params = op.parameters.len(),
                "Loaded operation"
            );
            operations.push(op);
        }
    }

    Ok(ApiDescription {
        base_path,
        operations,
    })
}

/// Swagger 2 `basePath`, else the path component of the first OpenAPI 3 server.
fn extract_base_path(root: &Map<String, Value>) -> String {
    let raw = root
        .get("basePath")
        .and_then(Value::as_str)
        .map(str::to_string)
        .or_else(|| {
            root.get("servers")
                .and_then(Value::as_array)
                .and_then(|servers| servers.first())
                .and_then(|server| server.get("url"))
                .and_then(Value::as_str)
                .map(server_url_path)
        })
        .unwrap_or_default();

    normalize_base_path(&raw)
}

/// Leading slash, no trailing slash, empty for the root.
#[must_use]
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Path of a server URL that may be absolute or relative.
fn server_url_path(url_str: &str) -> String {
    url::Url::parse(url_str)
        .or_else(|_| url::Url::parse(&format!("http://dummy{url_str}")))
        .map(|u| u.path().to_string())
        .unwrap_or_default()
}

/// Key used to detect the same operation declared twice.
fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn extract_operation(
    doc: &Value,
    path: &str,
    method: Method,
    operation: &Map<String, Value>,
    path_level: &[ParameterDeclaration],
    location: &str,
) -> Result<Operation, SpecParseError> {
    let operation_id = match operation.get("operationId") {
        None | Some(Value::Null) => None,
        Some(Value::String(id)) if id.trim().is_empty() => None,
        Some(Value::String(id)) => Some(id.clone()),
        Some(_) => {
            return Err(SpecParseError::invalid(
                format!("{location}/operationId"),
                "must be a string",
            ))
        }
    };

    let summary = operation
        .get("summary")
        .and_then(Value::as_str)
        .map(str::to_string);
    let description = operation
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);
    let tags = operation
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let op_level = extract_parameters(doc, operation.get("parameters"), location)?;
    let mut parameters = merge_parameters(path_level, op_level);

    if let Some(body) = extract_request_body(doc, operation, location)? {
        if !parameters
            .iter()
            .any(|p| p.location == ParameterLocation::Body)
        {
            parameters.push(body);
        }
    }

    Ok(Operation {
        operation_id,
        method,
        path: path.to_string(),
        summary,
        description,
        tags,
        parameters,
    })
}

/// Operation-level declarations replace path-level ones with the same name and
/// location, keeping the path-level position.
fn merge_parameters(
    path_level: &[ParameterDeclaration],
    op_level: Vec<ParameterDeclaration>,
) -> Vec<ParameterDeclaration> {
    let mut merged = path_level.to_vec();
    for param in op_level {
        match merged
            .iter_mut()
            .find(|p| p.name == param.name && p.location == param.location)
        {
            Some(existing) => *existing = param,
            None => merged.push(param),
        }
    }
    merged
}

fn extract_parameters(
    doc: &Value,
    params: Option<&Value>,
    location: &str,
) -> Result<Vec<ParameterDeclaration>, SpecParseError> {
    let params = match params {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(params)) => params,
        Some(_) => {
            return Err(SpecParseError::invalid(
                format!("{location}/parameters"),
                "must be an array",
            ))
        }
    };

    params
        .iter()
        .enumerate()
        .map(|(idx, raw)| parse_parameter(doc, raw, &format!("{location}/parameters/{idx}")))
        .collect()
}

fn parse_parameter(
    doc: &Value,
    raw: &Value,
    location: &str,
) -> Result<ParameterDeclaration, SpecParseError> {
    let param = resolve_ref(doc, raw, location)?;
    let obj = param
        .as_object()
        .ok_or_else(|| SpecParseError::invalid(location, "parameter must be an object"))?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| SpecParseError::MissingParamName {
            location: location.to_string(),
        })?;

    let raw_in = obj
        .get("in")
        .and_then(Value::as_str)
        .ok_or_else(|| SpecParseError::MissingParamLocation {
            location: location.to_string(),
            name: name.to_string(),
        })?;
    let param_location =
        ParameterLocation::parse(raw_in).ok_or_else(|| SpecParseError::UnknownParamLocation {
            location: location.to_string(),
            name: name.to_string(),
            found: raw_in.to_string(),
        })?;

    // Swagger 2 declares `type`/`items`/`default` inline, OpenAPI 3 under `schema`.
    let schema = match obj.get("schema") {
        Some(schema) => Some(resolve_ref(doc, schema, location)?),
        None => None,
    };
    let field = |key: &str| obj.get(key).or_else(|| schema.and_then(|s| s.get(key)));

    let param_type = ParamType::from_declared(field("type").and_then(Value::as_str));
    let items = match param_type {
        ParamType::Array => Some(
            match ParamType::from_declared(
                field("items")
                    .and_then(|items| items.get("type"))
                    .and_then(Value::as_str),
            ) {
                ParamType::Array => ParamType::String,
                other => other,
            },
        ),
        _ => None,
    };

    Ok(ParameterDeclaration {
        name: name.to_string(),
        location: param_location,
        required: obj.get("required").and_then(Value::as_bool).unwrap_or(false),
        param_type,
        items,
        default: field("default").cloned(),
    })
}

/// OpenAPI 3 `requestBody` as a synthetic `body` parameter.
fn extract_request_body(
    doc: &Value,
    operation: &Map<String, Value>,
    location: &str,
) -> Result<Option<ParameterDeclaration>, SpecParseError> {
    let raw = match operation.get("requestBody") {
        None | Some(Value::Null) => return Ok(None),
        Some(raw) => raw,
    };
    let body_location = format!("{location}/requestBody");
    let body = resolve_ref(doc, raw, &body_location)?;
    if !body.is_object() {
        return Err(SpecParseError::invalid(body_location, "must be an object"));
    }

    Ok(Some(ParameterDeclaration {
        name: "body".to_string(),
        location: ParameterLocation::Body,
        required: body.get("required").and_then(Value::as_bool).unwrap_or(false),
        param_type: ParamType::String,
        items: None,
        default: None,
    }))
}

/// Follow local `$ref` pointers (`#/parameters/…`, `#/components/…`).
fn resolve_ref<'a>(
    doc: &'a Value,
    value: &'a Value,
    location: &str,
) -> Result<&'a Value, SpecParseError> {
    let mut current = value;
    for _ in 0..MAX_REF_DEPTH {
        let reference = match current.get("$ref").and_then(Value::as_str) {
            Some(reference) => reference,
            None => return Ok(current),
        };
        current = reference
            .strip_prefix('#')
            .and_then(|pointer| doc.pointer(pointer))
            .ok_or_else(|| SpecParseError::UnresolvedRef {
                location: location.to_string(),
                reference: reference.to_string(),
            })?;
    }

    Err(SpecParseError::UnresolvedRef {
        location: location.to_string(),
        reference: current
            .get("$ref")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

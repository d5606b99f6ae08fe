//! Parsing and validation of structured model output
//!
//! Models are asked for JSON but often wrap it in a Markdown fence or add
//! a sentence around it. A fenced block is tried first, then the outermost
//! `{...}` or `[...]` span; the first one that satisfies the schema wins.

use crate::error::{ContentCraftError, Result};
use crate::schema::{FieldType, OutputField, OutputSchema};

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::OnceLock;

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("fence pattern is valid")
    })
}

fn fenced_body(raw: &str) -> Option<&str> {
    let body = fence_regex().captures(raw)?.get(1)?.as_str().trim();
    (!body.is_empty()).then_some(body)
}

fn outermost_span(raw: &str) -> Option<&str> {
    let start = raw.find(|c| c == '{' || c == '[')?;
    let closing = if raw[start..].starts_with('{') { '}' } else { ']' };
    let end = raw.rfind(closing)?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse raw model text and check it against `schema`
pub fn parse_and_validate(raw: &str, schema: &OutputSchema) -> Result<Value> {
    let trimmed = raw.trim();

    // A fence inside a JSON string (a code sample in generated Markdown)
    // can capture the wrong text, so each candidate must pass the schema.
    let candidates = [fenced_body(trimmed), outermost_span(trimmed)];
    let mut last_error = None;
    for payload in candidates.into_iter().flatten() {
        match validate_payload(payload, schema) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.unwrap_or_else(|| {
        ContentCraftError::schema_mismatch("response contains no JSON payload")
    }))
}

fn validate_payload(payload: &str, schema: &OutputSchema) -> Result<Value> {
    let value: Value = serde_json::from_str(payload).map_err(|e| {
        ContentCraftError::schema_mismatch(format!("response is not valid JSON: {}", e))
    })?;

    let object = value
        .as_object()
        .ok_or_else(|| ContentCraftError::schema_mismatch("response is not a JSON object"))?;

    check_fields(object, &schema.fields, "")?;
    Ok(value)
}

/// Validate, then deserialize into `T`
pub fn parse_as<T: DeserializeOwned>(raw: &str, schema: &OutputSchema) -> Result<T> {
    let value = parse_and_validate(raw, schema)?;
    serde_json::from_value(value).map_err(|e| {
        ContentCraftError::schema_mismatch(format!("response does not match expected type: {}", e))
    })
}

fn check_fields(object: &Map<String, Value>, fields: &[OutputField], prefix: &str) -> Result<()> {
    for field in fields {
        let path = if prefix.is_empty() {
            field.name.clone()
        } else {
            format!("{}.{}", prefix, field.name)
        };

        match object.get(&field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    return Err(ContentCraftError::schema_mismatch(format!(
                        "required field `{}` is missing",
                        path
                    )));
                }
            }
            Some(value) => check_type(value, &field.field_type, &path)?,
        }
    }
    Ok(())
}

fn check_type(value: &Value, field_type: &FieldType, path: &str) -> Result<()> {
    let wrong_type = || {
        ContentCraftError::schema_mismatch(format!(
            "field `{}` should be a {}",
            path,
            field_type.describe()
        ))
    };

    match field_type {
        FieldType::String => value.as_str().map(|_| ()).ok_or_else(wrong_type),
        FieldType::Number => value.as_f64().map(|_| ()).ok_or_else(wrong_type),
        FieldType::Boolean => value.as_bool().map(|_| ()).ok_or_else(wrong_type),
        FieldType::StringList {
            min_items,
            max_items,
        } => {
            let items = value.as_array().ok_or_else(wrong_type)?;
            if !items.iter().all(Value::is_string) {
                return Err(wrong_type());
            }
            check_bounds(items.len(), *min_items, *max_items, path)
        }
        FieldType::Object(fields) => {
            let object = value.as_object().ok_or_else(wrong_type)?;
            check_fields(object, fields, path)
        }
        FieldType::ObjectList {
            fields,
            min_items,
            max_items,
        } => {
            let items = value.as_array().ok_or_else(wrong_type)?;
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{}[{}]", path, index);
                let object = item.as_object().ok_or_else(|| {
                    ContentCraftError::schema_mismatch(format!(
                        "field `{}` should be an object",
                        item_path
                    ))
                })?;
                check_fields(object, fields, &item_path)?;
            }
            check_bounds(items.len(), *min_items, *max_items, path)
        }
    }
}

fn check_bounds(len: usize, min: Option<usize>, max: Option<usize>, path: &str) -> Result<()> {
    if let Some(min) = min {
        if len < min {
            return Err(ContentCraftError::schema_mismatch(format!(
                "field `{}` has {} items, expected at least {}",
                path, len, min
            )));
        }
    }
    if let Some(max) = max {
        if len > max {
            return Err(ContentCraftError::schema_mismatch(format!(
                "field `{}` has {} items, expected at most {}",
                path, len, max
            )));
        }
    }
    Ok(())
}

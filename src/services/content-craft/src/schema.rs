//! Input and output schemas attached to prompt templates

use serde_json::Value;

/// Kind of value a template input accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    TextList,
    Number,
    Flag,
}

impl InputKind {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            InputKind::Text => value.is_string(),
            InputKind::TextList => value
                .as_array()
                .map(|items| items.iter().all(Value::is_string))
                .unwrap_or(false),
            InputKind::Number => value.is_number(),
            InputKind::Flag => value.is_boolean(),
        }
    }
}

/// One declared template input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputField {
    pub name: String,
    pub kind: InputKind,
    pub required: bool,
}

impl InputField {
    pub fn required(name: &str, kind: InputKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: true,
        }
    }

    pub fn optional(name: &str, kind: InputKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            required: false,
        }
    }
}

/// Declared type of a field in a provider response
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    StringList {
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
    Object(Vec<OutputField>),
    ObjectList {
        fields: Vec<OutputField>,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },
}

impl FieldType {
    pub fn string_list() -> Self {
        FieldType::StringList {
            min_items: None,
            max_items: None,
        }
    }

    pub fn string_list_between(min_items: usize, max_items: usize) -> Self {
        FieldType::StringList {
            min_items: Some(min_items),
            max_items: Some(max_items),
        }
    }

    pub fn object_list(fields: Vec<OutputField>) -> Self {
        FieldType::ObjectList {
            fields,
            min_items: Some(1),
            max_items: None,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::StringList { .. } => "list of strings",
            FieldType::Object(_) => "object",
            FieldType::ObjectList { .. } => "list of objects",
        }
    }
}

/// One declared field in a provider response
#[derive(Debug, Clone, PartialEq)]
pub struct OutputField {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
}

impl OutputField {
    pub fn required(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: true,
        }
    }

    pub fn optional(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            required: false,
        }
    }
}

/// Shape a provider response must have. Image and free-form templates
/// declare an empty schema and are never validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSchema {
    pub fields: Vec<OutputField>,
}

impl OutputSchema {
    pub fn new(fields: Vec<OutputField>) -> Self {
        Self { fields }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_kind_accepts() {
        assert!(InputKind::Text.accepts(&json!("remote work")));
        assert!(!InputKind::Text.accepts(&json!(42)));
        assert!(InputKind::TextList.accepts(&json!(["a", "b"])));
        assert!(!InputKind::TextList.accepts(&json!(["a", 1])));
        assert!(InputKind::Number.accepts(&json!(500)));
        assert!(InputKind::Flag.accepts(&json!(true)));
    }

    #[test]
    fn test_string_list_bounds() {
        assert_eq!(
            FieldType::string_list_between(2, 4),
            FieldType::StringList {
                min_items: Some(2),
                max_items: Some(4)
            }
        );
        assert!(OutputSchema::empty().is_empty());
    }
}

//! Prompt template registry
//!
//! Templates are Handlebars strings compiled once at startup. Rendering runs
//! in strict mode with escaping switched off, so user text reaches the model
//! exactly as submitted. That also means user input can carry instructions
//! of its own into the prompt; nothing here tries to prevent it.
//!
//! Helpers available inside templates:
//! - `{{truncate field 8000}}` keeps the first n characters
//! - `{{join list ", "}}` joins a list of values
//! - `{{default field "fallback"}}` substitutes when a value is null or blank

use crate::error::{ContentCraftError, Result};
use crate::schema::{InputField, OutputSchema};

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// A named prompt with its declared inputs and expected output shape
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub input_fields: Vec<InputField>,
    pub output_schema: OutputSchema,
    pub template: String,
}

/// Registry of compiled prompt templates
pub struct PromptRegistry {
    handlebars: Handlebars<'static>,
    templates: HashMap<String, PromptTemplate>,
}

impl std::fmt::Debug for PromptRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptRegistry")
            .field("templates", &self.names())
            .finish()
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("truncate", Box::new(truncate_helper));
        handlebars.register_helper("join", Box::new(join_helper));
        handlebars.register_helper("default", Box::new(default_helper));

        Self {
            handlebars,
            templates: HashMap::new(),
        }
    }

    /// Create a registry holding every template the flows use
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::new();
        for template in crate::prompts::default_templates() {
            registry.register(template)?;
        }
        debug!("Registered {} prompt templates", registry.templates.len());
        Ok(registry)
    }

    /// Compile and store a template under its name
    pub fn register(&mut self, template: PromptTemplate) -> Result<()> {
        if self.templates.contains_key(&template.name) {
            return Err(ContentCraftError::configuration(format!(
                "prompt template '{}' is already registered",
                template.name
            )));
        }

        self.handlebars
            .register_template_string(&template.name, &template.template)?;
        self.templates.insert(template.name.clone(), template);
        Ok(())
    }

    /// Render a template with the given input values
    pub fn render(&self, name: &str, values: &Value) -> Result<String> {
        let template = self.get(name)?;

        let provided = match values {
            Value::Object(map) => map.clone(),
            Value::Null => Map::new(),
            _ => {
                return Err(ContentCraftError::configuration(format!(
                    "input values for '{}' must be an object",
                    name
                )))
            }
        };

        let mut resolved = Map::new();
        for field in &template.input_fields {
            match provided.get(&field.name) {
                Some(value) if !value.is_null() => {
                    if !field.kind.accepts(value) {
                        return Err(ContentCraftError::configuration(format!(
                            "input '{}' of template '{}' has the wrong type",
                            field.name, name
                        )));
                    }
                    resolved.insert(field.name.clone(), value.clone());
                }
                _ if field.required => {
                    return Err(ContentCraftError::configuration(format!(
                        "template '{}' requires input '{}'",
                        name, field.name
                    )));
                }
                _ => {
                    resolved.insert(field.name.clone(), Value::Null);
                }
            }
        }

        Ok(self.handlebars.render(name, &Value::Object(resolved))?)
    }

    /// Declared output schema of a template
    pub fn output_schema(&self, name: &str) -> Result<&OutputSchema> {
        Ok(&self.get(name)?.output_schema)
    }

    pub fn get(&self, name: &str) -> Result<&PromptTemplate> {
        self.templates.get(name).ok_or_else(|| {
            ContentCraftError::configuration(format!("unknown prompt template '{}'", name))
        })
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let text = h.param(0).map(|p| value_to_text(p.value())).unwrap_or_default();
    let limit = h
        .param(1)
        .and_then(|p| p.value().as_u64())
        .ok_or_else(|| RenderError::new("truncate expects a character count"))?;

    let truncated: String = text.chars().take(limit as usize).collect();
    out.write(&truncated)?;
    Ok(())
}

fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let separator = h
        .param(1)
        .and_then(|p| p.value().as_str())
        .unwrap_or(", ");

    let joined = match h.param(0).map(|p| p.value()) {
        Some(Value::Array(items)) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<String>>()
            .join(separator),
        Some(other) => value_to_text(other),
        None => String::new(),
    };

    out.write(&joined)?;
    Ok(())
}

fn default_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = h.param(0).map(|p| value_to_text(p.value())).unwrap_or_default();
    if value.trim().is_empty() {
        let fallback = h.param(1).map(|p| value_to_text(p.value())).unwrap_or_default();
        out.write(&fallback)?;
    } else {
        out.write(&value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::InputKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn template(name: &str, body: &str) -> PromptTemplate {
        PromptTemplate {
            name: name.to_string(),
            input_fields: vec![
                InputField::required("topic", InputKind::Text),
                InputField::optional("keywords", InputKind::TextList),
                InputField::optional("tone", InputKind::Text),
            ],
            output_schema: OutputSchema::empty(),
            template: body.to_string(),
        }
    }

    #[test]
    fn test_render_substitutes_fields() {
        let mut registry = PromptRegistry::new();
        registry
            .register(template("greeting", "Write about {{topic}} in a {{default tone \"neutral\"}} tone."))
            .unwrap();

        let prompt = registry
            .render("greeting", &json!({"topic": "Remote Work", "tone": "casual"}))
            .unwrap();
        assert_eq!(prompt, "Write about Remote Work in a casual tone.");

        let prompt = registry
            .render("greeting", &json!({"topic": "Remote Work"}))
            .unwrap();
        assert_eq!(prompt, "Write about Remote Work in a neutral tone.");
    }

    #[test]
    fn test_render_is_idempotent() {
        let registry = PromptRegistry::with_defaults().unwrap();
        let values = json!({
            "topic": "Remote Work",
            "keywords": ["async", "focus"],
            "audience": "managers",
            "tone": "casual"
        });

        let first = registry.render("outline", &values).unwrap();
        let second = registry.render("outline", &values).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_user_text_is_not_escaped() {
        let mut registry = PromptRegistry::new();
        registry.register(template("raw", "{{topic}}")).unwrap();

        let prompt = registry
            .render("raw", &json!({"topic": "<b>Tom & \"Jerry\"</b>"}))
            .unwrap();
        assert_eq!(prompt, "<b>Tom & \"Jerry\"</b>");
    }

    #[test]
    fn test_helpers() {
        let mut registry = PromptRegistry::new();
        registry
            .register(template("helpers", "{{truncate topic 6}}|{{join keywords \" / \"}}"))
            .unwrap();

        let prompt = registry
            .render(
                "helpers",
                &json!({"topic": "Remote Work", "keywords": ["a", "b", "c"]}),
            )
            .unwrap();
        assert_eq!(prompt, "Remote|a / b / c");

        let prompt = registry.render("helpers", &json!({"topic": "Hi"})).unwrap();
        assert_eq!(prompt, "Hi|");
    }

    #[test]
    fn test_missing_required_field_is_configuration_error() {
        let mut registry = PromptRegistry::new();
        registry.register(template("needs_topic", "{{topic}}")).unwrap();

        let error = registry
            .render("needs_topic", &json!({"tone": "casual"}))
            .unwrap_err();
        assert!(matches!(error, ContentCraftError::Configuration { .. }));

        let error = registry
            .render("needs_topic", &json!({"topic": null}))
            .unwrap_err();
        assert!(matches!(error, ContentCraftError::Configuration { .. }));
    }

    #[test]
    fn test_wrong_input_type_is_configuration_error() {
        let mut registry = PromptRegistry::new();
        registry.register(template("typed", "{{topic}}")).unwrap();

        let error = registry.render("typed", &json!({"topic": 7})).unwrap_err();
        assert!(matches!(error, ContentCraftError::Configuration { .. }));
    }

    #[test]
    fn test_unknown_template() {
        let registry = PromptRegistry::new();
        let error = registry.render("missing", &json!({})).unwrap_err();
        assert!(matches!(error, ContentCraftError::Configuration { .. }));
    }

    #[test]
    fn test_register_rejects_duplicates_and_bad_syntax() {
        let mut registry = PromptRegistry::new();
        registry.register(template("once", "{{topic}}")).unwrap();
        assert!(registry.register(template("once", "{{topic}}")).is_err());
        assert!(registry
            .register(template("broken", "{{#if topic}}unclosed"))
            .is_err());
    }

    #[test]
    fn test_default_catalogue_is_complete() {
        let registry = PromptRegistry::with_defaults().unwrap();
        for name in [
            "outline",
            "blog_post",
            "expand_content",
            "improve_content",
            "simplify_content",
            "depth_boost_content",
            "meta_title",
            "meta_description",
            "topic_ideas",
            "summarize_reference",
            "repurpose",
            "content_analysis",
            "hero_image",
            "visualize",
            "image",
            "freeform",
        ] {
            assert!(registry.get(name).is_ok(), "missing template {}", name);
        }
    }
}

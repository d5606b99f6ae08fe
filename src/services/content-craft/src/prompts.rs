//! Default prompt catalogue

use crate::schema::{FieldType, InputField, InputKind, OutputField, OutputSchema};
use crate::templates::PromptTemplate;

pub const OUTLINE: &str = "outline";
pub const BLOG_POST: &str = "blog_post";
pub const EXPAND_CONTENT: &str = "expand_content";
pub const IMPROVE_CONTENT: &str = "improve_content";
pub const SIMPLIFY_CONTENT: &str = "simplify_content";
pub const DEPTH_BOOST_CONTENT: &str = "depth_boost_content";
pub const META_TITLE: &str = "meta_title";
pub const META_DESCRIPTION: &str = "meta_description";
pub const TOPIC_IDEAS: &str = "topic_ideas";
pub const SUMMARIZE_REFERENCE: &str = "summarize_reference";
pub const REPURPOSE: &str = "repurpose";
pub const CONTENT_ANALYSIS: &str = "content_analysis";
pub const HERO_IMAGE: &str = "hero_image";
pub const VISUALIZE: &str = "visualize";
pub const IMAGE: &str = "image";
pub const FREEFORM: &str = "freeform";

fn prompt(
    name: &str,
    input_fields: Vec<InputField>,
    output_schema: OutputSchema,
    template: &str,
) -> PromptTemplate {
    PromptTemplate {
        name: name.to_string(),
        input_fields,
        output_schema,
        template: template.trim_start().to_string(),
    }
}

fn content_only() -> OutputSchema {
    OutputSchema::new(vec![OutputField::required("content", FieldType::String)])
}

fn rewrite_inputs() -> Vec<InputField> {
    vec![
        InputField::required("content", InputKind::Text),
        InputField::optional("instructions", InputKind::Text),
    ]
}

/// Every template used by the content flows
pub fn default_templates() -> Vec<PromptTemplate> {
    vec![
        prompt(
            OUTLINE,
            vec![
                InputField::required("topic", InputKind::Text),
                InputField::optional("keywords", InputKind::TextList),
                InputField::optional("audience", InputKind::Text),
                InputField::optional("tone", InputKind::Text),
            ],
            OutputSchema::new(vec![
                OutputField::required("title", FieldType::String),
                OutputField::required(
                    "sections",
                    FieldType::object_list(vec![
                        OutputField::required("heading", FieldType::String),
                        OutputField::required("points", FieldType::string_list()),
                    ]),
                ),
            ]),
            r#"
You are an experienced content strategist. Create a detailed blog post outline about "{{topic}}".
{{#if keywords}}Work these keywords in naturally: {{join keywords ", "}}.
{{/if}}{{#if audience}}The target audience is {{audience}}.
{{/if}}Tone: {{default tone "professional"}}.

Respond with JSON only, using this shape:
{"title": "string", "sections": [{"heading": "string", "points": ["string"]}]}
"#,
        ),
        prompt(
            BLOG_POST,
            vec![
                InputField::required("topic", InputKind::Text),
                InputField::required("tone", InputKind::Text),
                InputField::required("length", InputKind::Text),
                InputField::required("target_words", InputKind::Number),
                InputField::optional("keywords", InputKind::TextList),
                InputField::optional("outline", InputKind::Text),
            ],
            OutputSchema::new(vec![
                OutputField::required("title", FieldType::String),
                OutputField::required("content", FieldType::String),
            ]),
            r#"
Write a complete blog post about "{{topic}}" in a {{tone}} tone.
The post should be {{length}}, around {{target_words}} words, formatted in Markdown with headings.
{{#if keywords}}Include these keywords: {{join keywords ", "}}.
{{/if}}{{#if outline}}Follow this outline:
{{outline}}
{{/if}}
Respond with JSON only, using this shape:
{"title": "string", "content": "markdown string"}
"#,
        ),
        prompt(
            EXPAND_CONTENT,
            rewrite_inputs(),
            content_only(),
            r#"
Expand the following content with more detail, examples and supporting explanation while keeping its voice.
{{#if instructions}}Additional instructions: {{instructions}}
{{/if}}
Content:
{{content}}

Respond with JSON only: {"content": "markdown string"}
"#,
        ),
        prompt(
            IMPROVE_CONTENT,
            rewrite_inputs(),
            content_only(),
            r#"
Improve the following content. Fix grammar, tighten the wording and improve the flow without changing its meaning.
{{#if instructions}}Additional instructions: {{instructions}}
{{/if}}
Content:
{{content}}

Respond with JSON only: {"content": "markdown string"}
"#,
        ),
        prompt(
            SIMPLIFY_CONTENT,
            rewrite_inputs(),
            content_only(),
            r#"
Rewrite the following content in plain language. Use short sentences and everyday words.
{{#if instructions}}Additional instructions: {{instructions}}
{{/if}}
Content:
{{content}}

Respond with JSON only: {"content": "markdown string"}
"#,
        ),
        prompt(
            DEPTH_BOOST_CONTENT,
            rewrite_inputs(),
            content_only(),
            r#"
Deepen the following content. Add expert insight, data points, nuance and concrete examples.
{{#if instructions}}Additional instructions: {{instructions}}
{{/if}}
Content:
{{content}}

Respond with JSON only: {"content": "markdown string"}
"#,
        ),
        prompt(
            META_TITLE,
            vec![
                InputField::required("topic", InputKind::Text),
                InputField::optional("content", InputKind::Text),
                InputField::optional("keywords", InputKind::TextList),
            ],
            OutputSchema::new(vec![OutputField::required("metaTitle", FieldType::String)]),
            r#"
Write an SEO meta title between 50 and 60 characters for a blog post about "{{topic}}".
{{#if keywords}}Primary keywords: {{join keywords ", "}}.
{{/if}}{{#if content}}Post excerpt:
{{truncate content 2000}}
{{/if}}
Respond with JSON only: {"metaTitle": "string"}
"#,
        ),
        prompt(
            META_DESCRIPTION,
            vec![
                InputField::required("topic", InputKind::Text),
                InputField::optional("content", InputKind::Text),
                InputField::optional("keywords", InputKind::TextList),
            ],
            OutputSchema::new(vec![OutputField::required(
                "metaDescription",
                FieldType::String,
            )]),
            r#"
Write an SEO meta description between 150 and 160 characters for a blog post about "{{topic}}".
{{#if keywords}}Primary keywords: {{join keywords ", "}}.
{{/if}}{{#if content}}Post excerpt:
{{truncate content 2000}}
{{/if}}
Respond with JSON only: {"metaDescription": "string"}
"#,
        ),
        prompt(
            TOPIC_IDEAS,
            vec![
                InputField::required("keywords", InputKind::Text),
                InputField::optional("audience", InputKind::Text),
            ],
            OutputSchema::new(vec![OutputField::required(
                "ideas",
                FieldType::string_list_between(5, 5),
            )]),
            r#"
Suggest exactly 5 engaging blog post titles about: {{keywords}}.
{{#if audience}}The readers are {{audience}}.
{{/if}}
Respond with JSON only: {"ideas": ["string", "string", "string", "string", "string"]}
"#,
        ),
        prompt(
            SUMMARIZE_REFERENCE,
            vec![InputField::required("text", InputKind::Text)],
            OutputSchema::new(vec![OutputField::required(
                "keyPoints",
                FieldType::string_list_between(2, 4),
            )]),
            r#"
Read the reference material below and extract between 2 and 4 key points a blog writer should use.

Reference:
{{truncate text 8000}}

Respond with JSON only: {"keyPoints": ["string"]}
"#,
        ),
        prompt(
            REPURPOSE,
            vec![
                InputField::required("content", InputKind::Text),
                InputField::optional("title", InputKind::Text),
            ],
            OutputSchema::new(vec![
                OutputField::required(
                    "tweetThread",
                    FieldType::StringList {
                        min_items: Some(1),
                        max_items: None,
                    },
                ),
                OutputField::required("linkedInPost", FieldType::String),
                OutputField::required("instagramPost", FieldType::String),
                OutputField::required("emailNewsletterSummary", FieldType::String),
            ]),
            r#"
Repurpose the blog post below for other channels.
{{#if title}}Title: {{title}}
{{/if}}
Post:
{{content}}

Produce a tweet thread (each tweet under 280 characters), a LinkedIn post, an Instagram caption with hashtags and a short email newsletter summary.
Respond with JSON only:
{"tweetThread": ["string"], "linkedInPost": "string", "instagramPost": "string", "emailNewsletterSummary": "string"}
"#,
        ),
        prompt(
            CONTENT_ANALYSIS,
            vec![
                InputField::required("content", InputKind::Text),
                InputField::optional("keywords", InputKind::TextList),
            ],
            OutputSchema::new(vec![
                OutputField::required("readabilityScore", FieldType::Number),
                OutputField::required("seoScore", FieldType::Number),
                OutputField::required("readingLevel", FieldType::String),
                OutputField::required("suggestions", FieldType::string_list()),
            ]),
            r#"
Analyze the blog content below for readability and SEO.
{{#if keywords}}Target keywords: {{join keywords ", "}}.
{{/if}}
Content:
{{content}}

Scores range from 0.0 to 1.0.
Respond with JSON only:
{"readabilityScore": 0.0, "seoScore": 0.0, "readingLevel": "string", "suggestions": ["string"]}
"#,
        ),
        prompt(
            HERO_IMAGE,
            vec![
                InputField::required("title", InputKind::Text),
                InputField::optional("summary", InputKind::Text),
                InputField::optional("style", InputKind::Text),
            ],
            OutputSchema::empty(),
            r#"
A striking hero image for a blog post titled "{{title}}".
{{#if summary}}The post is about: {{truncate summary 500}}
{{/if}}Style: {{default style "modern editorial photography"}}. No text or lettering in the image.
"#,
        ),
        prompt(
            VISUALIZE,
            vec![
                InputField::required("content", InputKind::Text),
                InputField::optional("style", InputKind::Text),
            ],
            OutputSchema::empty(),
            r#"
An illustration that visualizes the following passage:
{{truncate content 1500}}
Style: {{default style "clean flat illustration"}}. No text or lettering in the image.
"#,
        ),
        prompt(
            IMAGE,
            vec![
                InputField::required("prompt", InputKind::Text),
                InputField::optional("style", InputKind::Text),
            ],
            OutputSchema::empty(),
            r#"
{{prompt}}{{#if style}}
Style: {{style}}{{/if}}
"#,
        ),
        prompt(
            FREEFORM,
            vec![InputField::required("prompt", InputKind::Text)],
            OutputSchema::empty(),
            "{{prompt}}",
        ),
    ]
}

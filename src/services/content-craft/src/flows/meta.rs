use super::{not_blank, recover, ContentFlows};
use crate::error::Result;
use crate::prompts;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MetaRequest {
    #[validate(custom = "not_blank")]
    pub topic: String,
    pub content: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl MetaRequest {
    fn values(&self) -> Value {
        json!({
            "topic": self.topic.trim(),
            "content": self.content,
            "keywords": self.keywords,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaTitle {
    meta_title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaDescription {
    meta_description: String,
}

pub fn fallback_meta_title(topic: &str) -> String {
    format!("{} | A Complete Guide", topic.trim())
}

pub fn fallback_meta_description(topic: &str) -> String {
    format!(
        "Discover everything you need to know about {}. Practical insights, expert tips and actionable advice to help you get started today.",
        topic.trim()
    )
}

impl ContentFlows {
    /// SEO title aimed at 50-60 characters. The length is asked for, not enforced.
    pub async fn generate_meta_title(&self, request: &MetaRequest) -> Result<String> {
        info!("Generating meta title for topic: {}", request.topic);

        let result = self
            .run_structured::<MetaTitle>(prompts::META_TITLE, request.values())
            .await
            .map(|meta| meta.meta_title.trim().to_string());

        recover(prompts::META_TITLE, result, || {
            fallback_meta_title(&request.topic)
        })
    }

    /// SEO description aimed at 150-160 characters
    pub async fn generate_meta_description(&self, request: &MetaRequest) -> Result<String> {
        info!("Generating meta description for topic: {}", request.topic);

        let result = self
            .run_structured::<MetaDescription>(prompts::META_DESCRIPTION, request.values())
            .await
            .map(|meta| meta.meta_description.trim().to_string());

        recover(prompts::META_DESCRIPTION, result, || {
            fallback_meta_description(&request.topic)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::test_support::flows_with;
    use crate::providers::ScriptedTextGenerator;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn request() -> MetaRequest {
        MetaRequest {
            topic: "Remote Work".to_string(),
            content: Some("A long post about remote work.".to_string()),
            keywords: vec!["remote".to_string()],
        }
    }

    #[tokio::test]
    async fn test_meta_title() {
        let flows = flows_with(Arc::new(ScriptedTextGenerator::repeating(
            r#"{"metaTitle": "Remote Work: How to Thrive Outside the Office"}"#,
        )));
        let title = flows.generate_meta_title(&request()).await.unwrap();
        assert_eq!(title, "Remote Work: How to Thrive Outside the Office");
    }

    #[tokio::test]
    async fn test_meta_fallbacks() {
        let flows = flows_with(Arc::new(ScriptedTextGenerator::repeating("```\nnope\n```")));

        let title = flows.generate_meta_title(&request()).await.unwrap();
        assert_eq!(title, "Remote Work | A Complete Guide");

        let description = flows.generate_meta_description(&request()).await.unwrap();
        assert_eq!(description, fallback_meta_description("Remote Work"));
        assert!(description.contains("about Remote Work."));
    }
}

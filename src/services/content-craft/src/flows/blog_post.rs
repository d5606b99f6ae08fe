use super::{not_blank, ContentFlows};
use crate::error::Result;
use crate::prompts;

use contentcraft_shared::{ContentLength, Settings};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

const DEFAULT_TONE: &str = "professional";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostRequest {
    #[validate(custom = "not_blank")]
    pub topic: String,
    pub tone: Option<String>,
    pub length: Option<ContentLength>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Outline to follow, as plain text
    pub outline: Option<String>,
}

impl BlogPostRequest {
    /// Fill tone and length from the user's settings when not given
    pub fn with_defaults(mut self, settings: &Settings) -> Self {
        if self.tone.as_deref().map_or(true, |t| t.trim().is_empty()) {
            self.tone = Some(settings.default_tone.clone());
        }
        if self.length.is_none() {
            self.length = Some(settings.default_length);
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
}

impl ContentFlows {
    /// Write a full post sized to the requested length. No fallback.
    pub async fn generate_blog_post(&self, request: &BlogPostRequest) -> Result<BlogPost> {
        let length = request.length.unwrap_or_default();
        let tone = request.tone.as_deref().unwrap_or(DEFAULT_TONE);
        info!(%length, tone, "Generating blog post for topic: {}", request.topic);

        self.run_structured(
            prompts::BLOG_POST,
            json!({
                "topic": request.topic.trim(),
                "tone": tone,
                "length": length.to_string(),
                "target_words": length.target_words(),
                "keywords": request.keywords,
                "outline": request.outline,
            }),
        )
        .await
    }
}

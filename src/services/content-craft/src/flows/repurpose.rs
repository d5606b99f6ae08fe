use super::{not_blank, ContentFlows};
use crate::error::Result;
use crate::prompts;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RepurposeRequest {
    #[validate(custom = "not_blank")]
    pub content: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepurposedContent {
    pub tweet_thread: Vec<String>,
    pub linked_in_post: String,
    pub instagram_post: String,
    pub email_newsletter_summary: String,
}

impl ContentFlows {
    /// Social and newsletter variants of a post. No fallback.
    pub async fn repurpose_content(&self, request: &RepurposeRequest) -> Result<RepurposedContent> {
        info!("Repurposing {} characters of content", request.content.len());

        self.run_structured(
            prompts::REPURPOSE,
            json!({
                "content": request.content,
                "title": request.title,
            }),
        )
        .await
    }
}

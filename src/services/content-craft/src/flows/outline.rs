use super::{not_blank, ContentFlows};
use crate::error::Result;
use crate::prompts;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OutlineRequest {
    #[validate(custom = "not_blank")]
    pub topic: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub audience: Option<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub title: String,
    pub sections: Vec<OutlineSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineSection {
    pub heading: String,
    pub points: Vec<String>,
}

impl ContentFlows {
    /// Generate a structured outline. No fallback.
    pub async fn generate_outline(&self, request: &OutlineRequest) -> Result<Outline> {
        info!("Generating outline for topic: {}", request.topic);

        self.run_structured(
            prompts::OUTLINE,
            json!({
                "topic": request.topic.trim(),
                "keywords": request.keywords,
                "audience": request.audience,
                "tone": request.tone,
            }),
        )
        .await
    }
}

use super::{not_blank, recover, ContentFlows};
use crate::error::Result;
use crate::prompts;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TopicIdeasRequest {
    #[validate(custom = "not_blank")]
    pub keywords: String,
    pub audience: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Ideas {
    ideas: Vec<String>,
}

/// Five title ideas built from the keywords
pub fn fallback_ideas(keywords: &str) -> Vec<String> {
    let k = keywords.trim();
    vec![
        format!("The Ultimate Guide to {}", k),
        format!("10 Common Mistakes to Avoid with {}", k),
        format!("How {} Is Changing the Way We Work", k),
        format!("{}: Tips and Best Practices for Beginners", k),
        format!("The Future of {}: Trends to Watch", k),
    ]
}

impl ContentFlows {
    /// Exactly five topic ideas
    pub async fn generate_topic_ideas(&self, request: &TopicIdeasRequest) -> Result<Vec<String>> {
        info!("Generating topic ideas for: {}", request.keywords);

        let result = self
            .run_structured::<Ideas>(
                prompts::TOPIC_IDEAS,
                json!({
                    "keywords": request.keywords.trim(),
                    "audience": request.audience,
                }),
            )
            .await
            .map(|ideas| ideas.ideas);

        recover(prompts::TOPIC_IDEAS, result, || {
            fallback_ideas(&request.keywords)
        })
    }
}

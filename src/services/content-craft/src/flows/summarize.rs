use super::{not_blank, recover, ContentFlows};
use crate::error::Result;
use crate::prompts;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    #[validate(custom = "not_blank")]
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyPoints {
    key_points: Vec<String>,
}

pub fn fallback_key_points() -> Vec<String> {
    vec![
        "Unable to extract key points from the reference text.".to_string(),
        "Please review the source material manually or try again later.".to_string(),
    ]
}

impl ContentFlows {
    /// Two to four key points from reference material
    pub async fn summarize_reference(&self, request: &SummarizeRequest) -> Result<Vec<String>> {
        info!("Summarizing {} characters of reference text", request.text.len());

        let result = self
            .run_structured::<KeyPoints>(
                prompts::SUMMARIZE_REFERENCE,
                json!({ "text": request.text }),
            )
            .await
            .map(|points| points.key_points);

        recover(prompts::SUMMARIZE_REFERENCE, result, fallback_key_points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::test_support::flows_with;
    use crate::providers::ScriptedTextGenerator;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn request() -> SummarizeRequest {
        SummarizeRequest {
            text: "Remote teams need clear written communication.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_key_points() {
        let text = Arc::new(ScriptedTextGenerator::repeating(
            r#"{"keyPoints": ["Write things down", "Default to async", "Meet with intent"]}"#,
        ));
        let flows = flows_with(text.clone());

        let points = flows.summarize_reference(&request()).await.unwrap();
        assert_eq!(points.len(), 3);
    }

    #[tokio::test]
    async fn test_long_reference_is_truncated_in_prompt() {
        let text = Arc::new(ScriptedTextGenerator::repeating(r#"{"keyPoints": ["a", "b"]}"#));
        let flows = flows_with(text.clone());

        let long = SummarizeRequest {
            text: "x".repeat(20_000),
        };
        flows.summarize_reference(&long).await.unwrap();
        assert!(!text.prompts()[0].contains(&"x".repeat(8001)));
        assert!(text.prompts()[0].contains(&"x".repeat(8000)));
    }

    #[tokio::test]
    async fn test_fallback_is_two_fixed_strings() {
        for raw in ["no json", r#"{"keyPoints": ["only one"]}"#, r#"{"keyPoints": ["1", "2", "3", "4", "5"]}"#] {
            let flows = flows_with(Arc::new(ScriptedTextGenerator::repeating(raw)));
            let points = flows.summarize_reference(&request()).await.unwrap();
            assert_eq!(points, fallback_key_points());
        }
    }
}

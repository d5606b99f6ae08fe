use super::{not_blank, ContentFlows};
use crate::error::Result;
use crate::prompts;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TextRequest {
    #[validate(custom = "not_blank")]
    pub prompt: String,
    #[validate(range(min = 0.0, max = 1.0))]
    pub temperature: Option<f32>,
    #[validate(range(min = 1))]
    pub max_output_tokens: Option<u32>,
}

impl ContentFlows {
    /// Free-form text generation, retried with exponential backoff
    pub async fn generate_text(&self, request: &TextRequest) -> Result<String> {
        let prompt = self
            .registry
            .render(prompts::FREEFORM, &json!({ "prompt": request.prompt }))?;

        let mut options = self.options.clone();
        if let Some(temperature) = request.temperature {
            options.temperature = temperature;
        }
        if let Some(max_output_tokens) = request.max_output_tokens {
            options.max_output_tokens = max_output_tokens;
        }

        info!(
            max_attempts = self.retry.max_attempts,
            "Generating free-form text"
        );

        self.retry
            .run(|| self.invoker.invoke_text(&prompt, &options))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentCraftError;
    use crate::flows::test_support::flows_with;
    use crate::providers::ScriptedTextGenerator;
    use std::sync::Arc;

    fn request() -> TextRequest {
        TextRequest {
            prompt: "Write a haiku about remote work".to_string(),
            temperature: None,
            max_output_tokens: None,
        }
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let text = Arc::new(ScriptedTextGenerator::new(vec![
            Err(ContentCraftError::network("timeout")),
            Err(ContentCraftError::upstream("gemini", "HTTP 503")),
            Ok("Quiet home office".to_string()),
        ]));
        let flows = flows_with(text.clone());

        let output = flows.generate_text(&request()).await.unwrap();
        assert_eq!(output, "Quiet home office");
        assert_eq!(text.calls(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_limit() {
        let text = Arc::new(ScriptedTextGenerator::failing());
        let flows = flows_with(text.clone());

        let error = flows.generate_text(&request()).await.unwrap_err();
        assert!(matches!(error, ContentCraftError::Upstream { .. }));
        assert_eq!(text.calls(), 3);
    }

    #[test]
    fn test_request_validation() {
        let invalid = TextRequest {
            temperature: Some(1.5),
            ..request()
        };
        assert!(invalid.validate().is_err());
        assert!(request().validate().is_ok());
    }
}

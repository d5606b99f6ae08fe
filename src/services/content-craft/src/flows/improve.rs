use super::{not_blank, recover, ContentFlows};
use crate::error::Result;
use crate::prompts;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

/// Rewrite operations on existing content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImproveAction {
    Expand,
    #[default]
    Improve,
    Simplify,
    DepthBoost,
}

impl ImproveAction {
    fn template(&self) -> &'static str {
        match self {
            ImproveAction::Expand => prompts::EXPAND_CONTENT,
            ImproveAction::Improve => prompts::IMPROVE_CONTENT,
            ImproveAction::Simplify => prompts::SIMPLIFY_CONTENT,
            ImproveAction::DepthBoost => prompts::DEPTH_BOOST_CONTENT,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            ImproveAction::Expand => "expand",
            ImproveAction::Improve => "improve",
            ImproveAction::Simplify => "simplify",
            ImproveAction::DepthBoost => "deepen",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    #[validate(custom = "not_blank")]
    pub content: String,
    #[serde(default)]
    pub action: ImproveAction,
    pub instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Rewritten {
    content: String,
}

/// Original content behind a notice that the rewrite did not happen
pub fn failure_notice(action: ImproveAction, content: &str) -> String {
    format!(
        "> **Note:** The AI could not {} this content, so the original text is shown unchanged.\n\n{}",
        action.verb(),
        content
    )
}

impl ContentFlows {
    /// Rewrite content. Falls back to the original with a notice.
    pub async fn improve_content(&self, request: &ImproveRequest) -> Result<String> {
        info!(action = ?request.action, "Rewriting {} characters", request.content.len());

        let result = self
            .run_structured::<Rewritten>(
                request.action.template(),
                json!({
                    "content": request.content,
                    "instructions": request.instructions,
                }),
            )
            .await
            .map(|rewritten| rewritten.content);

        recover(request.action.template(), result, || {
            failure_notice(request.action, &request.content)
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

    fn request(action: ImproveAction) -> ImproveRequest {
        ImproveRequest {
            content: "Remote work is good.".to_string(),
            action,
            instructions: None,
        }
    }

    #[test]
    fn test_action_names() {
        let action: ImproveAction = serde_json::from_str("\"depthBoost\"").unwrap();
        assert_eq!(action, ImproveAction::DepthBoost);
    }

    #[tokio::test]
    async fn test_rewrite_uses_action_template() {
        let text = Arc::new(ScriptedTextGenerator::repeating(
            r#"{"content": "Remote work is simple."}"#,
        ));
        let flows = flows_with(text.clone());

        let content = flows
            .improve_content(&request(ImproveAction::Simplify))
            .await
            .unwrap();
        assert_eq!(content, "Remote work is simple.");
        assert!(text.prompts()[0].contains("plain language"));
    }

    #[tokio::test]
    async fn test_fallback_keeps_original() {
        for action in [
            ImproveAction::Expand,
            ImproveAction::Improve,
            ImproveAction::Simplify,
            ImproveAction::DepthBoost,
        ] {
            let flows = flows_with(Arc::new(ScriptedTextGenerator::repeating("not json")));
            let content = flows.improve_content(&request(action)).await.unwrap();
            assert_eq!(content, failure_notice(action, "Remote work is good."));
            assert!(content.ends_with("\n\nRemote work is good."));
        }
    }

    #[tokio::test]
    async fn test_fallback_on_upstream_failure() {
        let flows = flows_with(Arc::new(ScriptedTextGenerator::failing()));
        let content = flows
            .improve_content(&request(ImproveAction::Expand))
            .await
            .unwrap();
        assert!(content.starts_with("> **Note:** The AI could not expand"));
    }
}

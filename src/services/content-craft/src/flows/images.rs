use super::{not_blank, ContentFlows};
use crate::error::Result;
use crate::prompts;
use crate::providers::GeneratedImage;

use contentcraft_shared::HeroImage;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use validator::Validate;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HeroImageRequest {
    #[validate(custom = "not_blank")]
    pub title: String,
    pub summary: Option<String>,
    pub style: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VisualizeRequest {
    #[validate(custom = "not_blank")]
    pub content: String,
    pub style: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    #[validate(custom = "not_blank")]
    pub prompt: String,
    pub style: Option<String>,
}

/// Generated image as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    /// `data:` URI
    pub url: String,
    pub mime_type: String,
}

impl From<GeneratedImage> for ImageResult {
    fn from(image: GeneratedImage) -> Self {
        Self {
            url: image.to_data_uri(),
            mime_type: image.mime_type,
        }
    }
}

impl ContentFlows {
    /// Hero image for a post. No fallback.
    pub async fn generate_hero_image(&self, request: &HeroImageRequest) -> Result<HeroImage> {
        let title = request.title.trim();
        info!("Generating hero image for: {}", title);

        let image = self
            .run_image(
                prompts::HERO_IMAGE,
                json!({
                    "title": title,
                    "summary": request.summary,
                    "style": request.style,
                }),
            )
            .await?;

        Ok(HeroImage::new(
            image.to_data_uri(),
            title,
            format!("Hero image for \"{}\"", title),
        ))
    }

    /// Illustration for a passage of content. No fallback.
    pub async fn visualize_content(&self, request: &VisualizeRequest) -> Result<ImageResult> {
        info!("Visualizing {} characters of content", request.content.len());

        let image = self
            .run_image(
                prompts::VISUALIZE,
                json!({
                    "content": request.content,
                    "style": request.style,
                }),
            )
            .await?;
        Ok(image.into())
    }

    /// Image from a free-form prompt. No fallback.
    pub async fn generate_image(&self, request: &ImageRequest) -> Result<ImageResult> {
        info!("Generating image from prompt");

        let image = self
            .run_image(
                prompts::IMAGE,
                json!({
                    "prompt": request.prompt,
                    "style": request.style,
                }),
            )
            .await?;
        Ok(image.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentCraftError;
    use crate::flows::test_support::flows_with_image;
    use crate::providers::{ScriptedTextGenerator, StaticImageGenerator};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_hero_image_is_data_uri() {
        let image = Arc::new(StaticImageGenerator::png());
        let flows = flows_with_image(Arc::new(ScriptedTextGenerator::failing()), image.clone());

        let hero = flows
            .generate_hero_image(&HeroImageRequest {
                title: "Remote Work".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(hero.url.starts_with("data:image/png;base64,"));
        assert_eq!(hero.caption, "Remote Work");
        assert_eq!(hero.alt_text, "Hero image for \"Remote Work\"");
        assert_eq!(image.calls(), 1);
    }

    #[tokio::test]
    async fn test_image_failures_raise() {
        let flows = flows_with_image(
            Arc::new(ScriptedTextGenerator::failing()),
            Arc::new(StaticImageGenerator::failing()),
        );

        let error = flows
            .generate_hero_image(&HeroImageRequest {
                title: "Remote Work".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(error, ContentCraftError::Upstream { .. }));

        let error = flows
            .visualize_content(&VisualizeRequest {
                content: "A quiet home office.".to_string(),
                style: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(error, ContentCraftError::Upstream { .. }));

        assert!(flows
            .generate_image(&ImageRequest {
                prompt: "A lighthouse".to_string(),
                style: None,
            })
            .await
            .is_err());
    }
}

//! Generation providers
//!
//! A provider turns a rendered prompt into raw model output. The production
//! implementation talks to the Google Generative Language API; scripted
//! providers in [`mock`] stand in for it in tests and offline runs.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiClient;
pub use mock::{ScriptedTextGenerator, StaticImageGenerator};

use crate::error::{ContentCraftError, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Sampling options for a text generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
    /// Ask the provider for a JSON response body
    pub json_output: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 2048,
            top_p: 0.9,
            top_k: 40,
            json_output: false,
        }
    }
}

impl ModelOptions {
    pub fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(ContentCraftError::configuration(format!(
                "temperature must be between 0.0 and 1.0, got {}",
                self.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ContentCraftError::configuration(format!(
                "top_p must be between 0.0 and 1.0, got {}",
                self.top_p
            )));
        }
        if self.max_output_tokens == 0 {
            return Err(ContentCraftError::configuration(
                "max_output_tokens must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Options for an image generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    pub aspect_ratio: String,
    pub sample_count: u32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            aspect_ratio: "16:9".to_string(),
            sample_count: 1,
        }
    }
}

/// Raw image returned by an image provider
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    pub fn from_base64(mime_type: &str, encoded: &str) -> Result<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| {
                ContentCraftError::upstream("image", format!("invalid base64 image data: {}", e))
            })?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    /// Encode as a `data:` URI suitable for an `<img src>`
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Text generation backend
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str, options: &ModelOptions) -> Result<String>;

    fn model_name(&self) -> &str;
}

/// Image generation backend
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str, options: &ImageOptions)
        -> Result<GeneratedImage>;

    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_options_defaults() {
        let options = ModelOptions::default();
        assert_eq!(options.temperature, 0.7);
        assert_eq!(options.max_output_tokens, 2048);
        assert_eq!(options.top_p, 0.9);
        assert_eq!(options.top_k, 40);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_model_options_validation() {
        assert!(ModelOptions::default().with_temperature(1.2).validate().is_err());
        assert!(ModelOptions::default().with_temperature(-0.1).validate().is_err());

        let options = ModelOptions {
            max_output_tokens: 0,
            ..ModelOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ContentCraftError::Configuration { .. })
        ));
    }

    #[test]
    fn test_data_uri() {
        let image = GeneratedImage {
            mime_type: "image/png".to_string(),
            bytes: b"png".to_vec(),
        };
        assert_eq!(image.to_data_uri(), "data:image/png;base64,cG5n");

        let decoded = GeneratedImage::from_base64("image/png", "cG5n").unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_invalid_base64_is_upstream_error() {
        let error = GeneratedImage::from_base64("image/png", "not base64!").unwrap_err();
        assert!(matches!(error, ContentCraftError::Upstream { .. }));
    }
}

//! Generation invoker
//!
//! Single entry point for outbound generation calls. Each invocation makes
//! exactly one provider call; retrying is left to the flows.

use crate::error::{ContentCraftError, Result};
use crate::providers::{GeneratedImage, ImageGenerator, ImageOptions, ModelOptions, TextGenerator};

use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct GenerationInvoker {
    text: Arc<dyn TextGenerator>,
    image: Arc<dyn ImageGenerator>,
}

impl std::fmt::Debug for GenerationInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationInvoker")
            .field("text_model", &self.text.model_name())
            .field("image_model", &self.image.model_name())
            .finish()
    }
}

impl GenerationInvoker {
    pub fn new(text: Arc<dyn TextGenerator>, image: Arc<dyn ImageGenerator>) -> Self {
        Self { text, image }
    }

    pub fn text_model(&self) -> &str {
        self.text.model_name()
    }

    pub fn image_model(&self) -> &str {
        self.image.model_name()
    }

    #[instrument(skip(self, prompt, options), fields(model = %self.text.model_name(), prompt_chars = prompt.len()))]
    pub async fn invoke_text(&self, prompt: &str, options: &ModelOptions) -> Result<String> {
        ensure_prompt(prompt)?;
        options.validate()?;

        let text = self.text.generate_text(prompt, options).await?;
        debug!(response_chars = text.len(), "text generation finished");
        Ok(text)
    }

    #[instrument(skip(self, prompt, options), fields(model = %self.image.model_name(), prompt_chars = prompt.len()))]
    pub async fn invoke_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<GeneratedImage> {
        ensure_prompt(prompt)?;
        if options.sample_count == 0 {
            return Err(ContentCraftError::configuration(
                "sample_count must be greater than 0",
            ));
        }

        let image = self.image.generate_image(prompt, options).await?;
        debug!(bytes = image.bytes.len(), mime = %image.mime_type, "image generation finished");
        Ok(image)
    }
}

fn ensure_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(ContentCraftError::validation("prompt", "must not be empty"));
    }
    Ok(())
}

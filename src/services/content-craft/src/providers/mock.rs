//! Scripted providers for tests and offline runs

use super::{GeneratedImage, ImageGenerator, ImageOptions, ModelOptions, TextGenerator};
use crate::error::{ContentCraftError, Result};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

/// 1x1 transparent PNG
const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x64,
    0xf8, 0xcf, 0x50, 0x0f, 0x00, 0x03, 0x86, 0x01, 0x80, 0x5a, 0x34, 0x7d, 0x6b, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

#[derive(Debug, Clone)]
enum Fallthrough {
    Text(String),
    Fail,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Text provider that replays a queue of canned responses
#[derive(Debug)]
pub struct ScriptedTextGenerator {
    script: Mutex<VecDeque<Result<String>>>,
    fallthrough: Fallthrough,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedTextGenerator {
    fn with_fallthrough(fallthrough: Fallthrough) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallthrough,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `text`
    pub fn repeating(text: impl Into<String>) -> Self {
        Self::with_fallthrough(Fallthrough::Text(text.into()))
    }

    /// Always fail with an upstream error
    pub fn failing() -> Self {
        Self::with_fallthrough(Fallthrough::Fail)
    }

    /// Answer from the queue, then fail once it runs out
    pub fn new(responses: Vec<Result<String>>) -> Self {
        let generator = Self::failing();
        lock(&generator.script).extend(responses);
        generator
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        lock(&self.prompts).clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedTextGenerator {
    async fn generate_text(&self, prompt: &str, _options: &ModelOptions) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.prompts).push(prompt.to_string());

        if let Some(response) = lock(&self.script).pop_front() {
            return response;
        }

        match &self.fallthrough {
            Fallthrough::Text(text) => Ok(text.clone()),
            Fallthrough::Fail => Err(ContentCraftError::upstream(
                "scripted",
                "no scripted response available",
            )),
        }
    }

    fn model_name(&self) -> &str {
        "scripted-text"
    }
}

/// Image provider returning a fixed image or a fixed failure
#[derive(Debug)]
pub struct StaticImageGenerator {
    image: Option<GeneratedImage>,
    calls: AtomicUsize,
}

impl StaticImageGenerator {
    pub fn new(image: GeneratedImage) -> Self {
        Self {
            image: Some(image),
            calls: AtomicUsize::new(0),
        }
    }

    /// A single transparent PNG pixel
    pub fn png() -> Self {
        Self::new(GeneratedImage {
            mime_type: "image/png".to_string(),
            bytes: PIXEL_PNG.to_vec(),
        })
    }

    pub fn failing() -> Self {
        Self {
            image: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageGenerator for StaticImageGenerator {
    async fn generate_image(
        &self,
        _prompt: &str,
        _options: &ImageOptions,
    ) -> Result<GeneratedImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.image
            .clone()
            .ok_or_else(|| ContentCraftError::upstream("scripted", "image generation failed"))
    }

    fn model_name(&self) -> &str {
        "scripted-image"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_script_then_fallthrough() {
        let generator = ScriptedTextGenerator::new(vec![
            Ok("first".to_string()),
            Err(ContentCraftError::network("reset")),
        ]);
        let options = ModelOptions::default();

        assert_eq!(generator.generate_text("a", &options).await.unwrap(), "first");
        assert!(generator.generate_text("b", &options).await.is_err());
        assert!(generator.generate_text("c", &options).await.is_err());
        assert_eq!(generator.calls(), 3);
        assert_eq!(generator.prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_static_image() {
        let generator = StaticImageGenerator::png();
        let image = generator
            .generate_image("a cat", &ImageOptions::default())
            .await
            .unwrap();
        assert!(image.to_data_uri().starts_with("data:image/png;base64,iVBORw0KGgo"));
        assert!(StaticImageGenerator::failing()
            .generate_image("a cat", &ImageOptions::default())
            .await
            .is_err());
    }
}

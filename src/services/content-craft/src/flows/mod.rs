//! Content flows
//!
//! A flow renders one prompt template, invokes the model and validates the
//! answer against the template's output schema. Some flows replace a failed
//! generation with a deterministic fallback of the same shape; the others
//! (outline, blog post, repurpose and every image flow) return the error.

pub mod analysis;
pub mod blog_post;
pub mod ideas;
pub mod images;
pub mod improve;
pub mod meta;
pub mod outline;
pub mod repurpose;
pub mod retry;
pub mod summarize;
pub mod text;

pub use analysis::{AnalysisRequest, ContentAnalysis};
pub use blog_post::{BlogPost, BlogPostRequest};
pub use ideas::TopicIdeasRequest;
pub use images::{HeroImageRequest, ImageRequest, ImageResult, VisualizeRequest};
pub use improve::{ImproveAction, ImproveRequest};
pub use meta::MetaRequest;
pub use outline::{Outline, OutlineRequest, OutlineSection};
pub use repurpose::{RepurposeRequest, RepurposedContent};
pub use retry::RetryPolicy;
pub use summarize::SummarizeRequest;
pub use text::TextRequest;

use crate::error::Result;
use crate::invoker::GenerationInvoker;
use crate::output;
use crate::providers::{GeneratedImage, ImageOptions, ModelOptions};
use crate::templates::PromptRegistry;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;
use validator::ValidationError;

/// Entry point for every generation capability
#[derive(Debug, Clone)]
pub struct ContentFlows {
    registry: Arc<PromptRegistry>,
    invoker: GenerationInvoker,
    options: ModelOptions,
    image_options: ImageOptions,
    retry: RetryPolicy,
}

impl ContentFlows {
    pub fn new(
        registry: Arc<PromptRegistry>,
        invoker: GenerationInvoker,
        options: ModelOptions,
        image_options: ImageOptions,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            registry,
            invoker,
            options,
            image_options,
            retry,
        }
    }

    pub fn invoker(&self) -> &GenerationInvoker {
        &self.invoker
    }

    /// Render, invoke in JSON mode and decode into `T`
    async fn run_structured<T: DeserializeOwned>(&self, template: &str, values: Value) -> Result<T> {
        let prompt = self.registry.render(template, &values)?;
        let schema = self.registry.output_schema(template)?;

        let options = self.options.clone().with_json_output();
        let raw = self.invoker.invoke_text(&prompt, &options).await?;
        output::parse_as(&raw, schema)
    }

    async fn run_image(&self, template: &str, values: Value) -> Result<GeneratedImage> {
        let prompt = self.registry.render(template, &values)?;
        self.invoker.invoke_image(&prompt, &self.image_options).await
    }
}

/// Swap a failed generation for `fallback`. Other errors pass through.
fn recover<T>(flow: &str, result: Result<T>, fallback: impl FnOnce() -> T) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_generation_failure() => {
            warn!(flow, code = e.error_code(), "using fallback: {}", e);
            Ok(fallback())
        }
        Err(e) => Err(e),
    }
}

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("must not be empty".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::providers::{ScriptedTextGenerator, StaticImageGenerator};
    use std::time::Duration;

    pub fn flows_with(text: Arc<ScriptedTextGenerator>) -> ContentFlows {
        flows_with_image(text, Arc::new(StaticImageGenerator::png()))
    }

    pub fn flows_with_image(
        text: Arc<ScriptedTextGenerator>,
        image: Arc<StaticImageGenerator>,
    ) -> ContentFlows {
        let registry = PromptRegistry::with_defaults().expect("default templates compile");
        ContentFlows::new(
            Arc::new(registry),
            GenerationInvoker::new(text, image),
            ModelOptions::default(),
            ImageOptions::default(),
            RetryPolicy {
                initial_delay: Duration::from_millis(1),
                max_delay: Duration::from_millis(4),
                ..RetryPolicy::default()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentCraftError;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("topic").is_ok());
        assert!(not_blank("  \t").is_err());
    }

    #[test]
    fn test_recover_only_generation_failures() {
        let recovered = recover("test", Err(ContentCraftError::schema_mismatch("bad")), || 7);
        assert_eq!(recovered.unwrap(), 7);

        let passed = recover("test", Err(ContentCraftError::configuration("bad")), || 7);
        assert!(matches!(passed, Err(ContentCraftError::Configuration { .. })));
    }
}

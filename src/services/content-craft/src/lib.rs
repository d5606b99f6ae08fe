//! # ContentCraft Service
//!
//! Blog content generation backend built on hosted generative models:
//! - Outlines, full posts and rewrites (expand, improve, simplify, depth boost)
//! - SEO meta titles/descriptions and readability analysis
//! - Topic ideas, reference summaries and social repurposing
//! - Hero images and illustrations via the image model
//! - Blog, settings and profile storage
//!
//! ## Layers
//!
//! Requests flow strictly downward: handler, then flow, then prompt
//! registry and invoker, then output validation. Handlers talk to storage
//! on their own.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use content_craft::{routes::create_router, AppState, ContentCraftConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ContentCraftConfig::from_env()?;
//!     let state = AppState::from_config(&config)?;
//!     let app = create_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod extract;
pub mod flows;
pub mod handlers;
pub mod invoker;
pub mod output;
pub mod prompts;
pub mod providers;
pub mod routes;
pub mod schema;
pub mod storage;
pub mod templates;
pub mod text;

pub use config::ContentCraftConfig;
pub use error::{ContentCraftError, Result};
pub use flows::ContentFlows;
pub use invoker::GenerationInvoker;
pub use templates::PromptRegistry;

// Re-export shared types for convenience
pub use contentcraft_shared::{
    BlogRecord, BlogUpdate, ContentLength, ErrorResponse, HealthStatus, HeroImage, NewBlogRecord,
    Profile, Settings,
};

use providers::{GeminiClient, ImageGenerator, TextGenerator};
use storage::{BlogRepository, InMemoryBlogRepository, InMemorySettingsStore, SettingsStore};

pub const SERVICE_NAME: &str = "content-craft";

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub flows: Arc<ContentFlows>,
    pub blogs: Arc<dyn BlogRepository>,
    pub settings: Arc<dyn SettingsStore>,
    pub credentials_configured: bool,
}

impl AppState {
    /// Wire the Gemini client and in-memory stores from configuration
    pub fn from_config(config: &ContentCraftConfig) -> Result<Self> {
        let gemini = Arc::new(GeminiClient::new(&config.gemini)?);
        let mut state = Self::with_providers(config, gemini.clone(), gemini)?;
        state.credentials_configured = config.gemini.has_credentials();
        Ok(state)
    }

    /// Wire explicit providers, used by tests and offline runs
    pub fn with_providers(
        config: &ContentCraftConfig,
        text: Arc<dyn TextGenerator>,
        image: Arc<dyn ImageGenerator>,
    ) -> Result<Self> {
        let registry = PromptRegistry::with_defaults()?;
        let flows = ContentFlows::new(
            Arc::new(registry),
            GenerationInvoker::new(text, image),
            config.generation.model_options(),
            config.generation.image_options(),
            config.retry.policy(),
        );

        Ok(Self {
            flows: Arc::new(flows),
            blogs: Arc::new(InMemoryBlogRepository::new()),
            settings: Arc::new(InMemorySettingsStore::new()),
            credentials_configured: true,
        })
    }
}

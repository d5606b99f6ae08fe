//! Request handlers for the ContentCraft service
//!
//! - Blog record CRUD and hero image attachment
//! - Settings and profile
//! - One generation endpoint per content flow
//! - Health
//!
//! Server-side failures are logged and answered with a fixed message per
//! endpoint; validation and not-found errors keep their own message.

use crate::error::{ContentCraftError, Result};
use crate::extract::{JsonBody, ValidatedJson};
use crate::flows::*;
use crate::AppState;
use contentcraft_shared::{BlogUpdate, HealthStatus, NewBlogRecord, Profile, Settings};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use validator::Validate;

pub mod blogs_handler {
    use super::*;

    /// Options for generating a blog's hero image
    #[derive(Debug, Default, Deserialize)]
    pub struct HeroImageOptions {
        pub style: Option<String>,
    }

    /// List all blog records, newest first
    pub async fn list_blogs(State(state): State<AppState>) -> Result<impl IntoResponse> {
        let blogs = state
            .blogs
            .list()
            .await
            .map_err(|e| e.into_public("Failed to list blogs"))?;

        Ok(Json(json!({ "blogs": blogs })))
    }

    /// Create a blog record
    pub async fn create_blog(
        State(state): State<AppState>,
        JsonBody(request): JsonBody<NewBlogRecord>,
    ) -> Result<impl IntoResponse> {
        let blog = state
            .blogs
            .create(request)
            .await
            .map_err(|e| e.into_public("Failed to create blog"))?;

        info!("Created blog {}", blog.id);
        Ok((StatusCode::CREATED, Json(json!({ "blog": blog }))))
    }

    /// Get a blog record by ID
    pub async fn get_blog(
        State(state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse> {
        let blog = state
            .blogs
            .get(&id)
            .await
            .map_err(|e| e.into_public("Failed to fetch blog"))?
            .ok_or_else(|| ContentCraftError::not_found(format!("blog {}", id)))?;

        Ok(Json(json!({ "blog": blog })))
    }

    /// Overwrite fields of a blog record
    pub async fn update_blog(
        State(state): State<AppState>,
        Path(id): Path<String>,
        JsonBody(update): JsonBody<BlogUpdate>,
    ) -> Result<impl IntoResponse> {
        if update.is_empty() {
            return Err(ContentCraftError::validation(
                "body",
                "provide at least one of title, content or heroImage",
            ));
        }

        let blog = state
            .blogs
            .update(&id, update)
            .await
            .map_err(|e| e.into_public("Failed to update blog"))?;

        info!("Updated blog {}", blog.id);
        Ok(Json(json!({ "blog": blog })))
    }

    /// Delete a blog record
    pub async fn delete_blog(
        State(state): State<AppState>,
        Path(id): Path<String>,
    ) -> Result<impl IntoResponse> {
        let deleted = state
            .blogs
            .delete(&id)
            .await
            .map_err(|e| e.into_public("Failed to delete blog"))?;

        if !deleted {
            return Err(ContentCraftError::not_found(format!("blog {}", id)));
        }

        info!("Deleted blog {}", id);
        Ok(Json(json!({ "deleted": true })))
    }

    /// Generate a hero image and attach it to the blog record
    pub async fn generate_blog_hero_image(
        State(state): State<AppState>,
        Path(id): Path<String>,
        options: Option<JsonBody<HeroImageOptions>>,
    ) -> Result<impl IntoResponse> {
        let blog = state
            .blogs
            .get(&id)
            .await
            .map_err(|e| e.into_public("Failed to fetch blog"))?
            .ok_or_else(|| ContentCraftError::not_found(format!("blog {}", id)))?;

        let title = blog
            .title
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| blog.content.chars().take(80).collect());
        if title.trim().is_empty() {
            return Err(ContentCraftError::validation(
                "blog",
                "needs a title or content to illustrate",
            ));
        }

        let request = HeroImageRequest {
            title,
            summary: Some(blog.content.clone()),
            style: options.and_then(|JsonBody(o)| o.style),
        };

        let hero_image = state
            .flows
            .generate_hero_image(&request)
            .await
            .map_err(|e| e.into_public("Failed to generate hero image"))?;

        let blog = state
            .blogs
            .update(
                &id,
                BlogUpdate {
                    hero_image: Some(hero_image),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| e.into_public("Failed to update blog"))?;

        Ok(Json(json!({ "blog": blog })))
    }
}

pub mod settings_handler {
    use super::*;

    /// Profile body with field checks
    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    pub struct ProfileRequest {
        #[validate(custom = "not_blank")]
        pub name: String,
        #[validate(email)]
        pub email: String,
        #[serde(default)]
        pub bio: String,
        #[validate(url)]
        pub avatar_url: Option<String>,
    }

    impl From<ProfileRequest> for Profile {
        fn from(request: ProfileRequest) -> Self {
            Profile {
                name: request.name,
                email: request.email,
                bio: request.bio,
                avatar_url: request.avatar_url,
            }
        }
    }

    pub async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse> {
        let settings = state
            .settings
            .settings()
            .await
            .map_err(|e| e.into_public("Failed to load settings"))?;

        Ok(Json(json!({ "settings": settings })))
    }

    /// Replace the settings record wholesale
    pub async fn update_settings(
        State(state): State<AppState>,
        JsonBody(settings): JsonBody<Settings>,
    ) -> Result<impl IntoResponse> {
        let settings = state
            .settings
            .replace_settings(settings)
            .await
            .map_err(|e| e.into_public("Failed to save settings"))?;

        info!("Settings updated");
        Ok(Json(json!({ "settings": settings })))
    }

    pub async fn get_profile(State(state): State<AppState>) -> Result<impl IntoResponse> {
        let profile = state
            .settings
            .profile()
            .await
            .map_err(|e| e.into_public("Failed to load profile"))?;

        Ok(Json(json!({ "profile": profile })))
    }

    /// Replace the profile record wholesale
    pub async fn update_profile(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<ProfileRequest>,
    ) -> Result<impl IntoResponse> {
        let profile = state
            .settings
            .replace_profile(request.into())
            .await
            .map_err(|e| e.into_public("Failed to save profile"))?;

        info!("Profile updated");
        Ok(Json(json!({ "profile": profile })))
    }
}

pub mod generation_handler {
    use super::*;
    use crate::text::word_count;

    pub async fn generate_outline(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<OutlineRequest>,
    ) -> Result<impl IntoResponse> {
        let outline = state
            .flows
            .generate_outline(&request)
            .await
            .map_err(|e| e.into_public("Failed to generate outline"))?;

        Ok(Json(json!({ "outline": outline })))
    }

    /// Generate a full post; tone and length default to the user's settings
    pub async fn generate_content(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<BlogPostRequest>,
    ) -> Result<impl IntoResponse> {
        let settings = state
            .settings
            .settings()
            .await
            .map_err(|e| e.into_public("Failed to generate content"))?;

        let post = state
            .flows
            .generate_blog_post(&request.with_defaults(&settings))
            .await
            .map_err(|e| e.into_public("Failed to generate content"))?;

        let words = word_count(&post.content);
        info!(words, "Generated blog post: {}", post.title);
        Ok(Json(json!({
            "title": post.title,
            "content": post.content,
            "wordCount": words,
        })))
    }

    pub async fn improve_content(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<ImproveRequest>,
    ) -> Result<impl IntoResponse> {
        let content = state
            .flows
            .improve_content(&request)
            .await
            .map_err(|e| e.into_public("Failed to improve content"))?;

        Ok(Json(json!({ "content": content })))
    }

    pub async fn optimize_content(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<AnalysisRequest>,
    ) -> Result<impl IntoResponse> {
        let analysis = state
            .flows
            .analyze_content(&request)
            .await
            .map_err(|e| e.into_public("Failed to analyze content"))?;

        Ok(Json(json!({ "analysis": analysis })))
    }

    /// Meta title and description, generated concurrently
    pub async fn generate_meta(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<MetaRequest>,
    ) -> Result<impl IntoResponse> {
        let (title, description) = tokio::join!(
            state.flows.generate_meta_title(&request),
            state.flows.generate_meta_description(&request)
        );

        let title = title.map_err(|e| e.into_public("Failed to generate meta data"))?;
        let description =
            description.map_err(|e| e.into_public("Failed to generate meta data"))?;

        Ok(Json(json!({
            "metaTitle": title,
            "metaDescription": description,
        })))
    }

    pub async fn topic_ideas(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<TopicIdeasRequest>,
    ) -> Result<impl IntoResponse> {
        let ideas = state
            .flows
            .generate_topic_ideas(&request)
            .await
            .map_err(|e| e.into_public("Failed to generate topic ideas"))?;

        Ok(Json(json!({ "ideas": ideas })))
    }

    pub async fn summarize(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<SummarizeRequest>,
    ) -> Result<impl IntoResponse> {
        let key_points = state
            .flows
            .summarize_reference(&request)
            .await
            .map_err(|e| e.into_public("Failed to summarize reference text"))?;

        Ok(Json(json!({ "keyPoints": key_points })))
    }

    pub async fn repurpose_content(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<RepurposeRequest>,
    ) -> Result<impl IntoResponse> {
        let repurposed = state
            .flows
            .repurpose_content(&request)
            .await
            .map_err(|e| e.into_public("Failed to repurpose content"))?;

        Ok(Json(json!({ "repurposed": repurposed })))
    }

    pub async fn visualize(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<VisualizeRequest>,
    ) -> Result<impl IntoResponse> {
        let image = state
            .flows
            .visualize_content(&request)
            .await
            .map_err(|e| e.into_public("Failed to visualize content"))?;

        Ok(Json(json!({ "image": image })))
    }

    pub async fn generate_image(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<ImageRequest>,
    ) -> Result<impl IntoResponse> {
        let image = state
            .flows
            .generate_image(&request)
            .await
            .map_err(|e| e.into_public("Failed to generate image"))?;

        Ok(Json(json!({ "image": image })))
    }

    /// Free-form text with bounded retry
    pub async fn generate_text(
        State(state): State<AppState>,
        ValidatedJson(request): ValidatedJson<TextRequest>,
    ) -> Result<impl IntoResponse> {
        let text = state
            .flows
            .generate_text(&request)
            .await
            .map_err(|e| e.into_public("Failed to generate text"))?;

        Ok(Json(json!({ "text": text })))
    }
}

pub mod health_handler {
    use super::*;

    /// Service health with the models in use
    pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
        let invoker = state.flows.invoker();

        Json(HealthStatus {
            status: "healthy".to_string(),
            service: crate::SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now(),
            text_model: invoker.text_model().to_string(),
            image_model: invoker.image_model().to_string(),
            credentials_configured: state.credentials_configured,
        })
    }
}

//! Routes for the ContentCraft service
//!
//! - Blog CRUD under `/api/blogs`
//! - Settings and profile
//! - Generation endpoints, one per flow
//! - Health

use crate::handlers::{blogs_handler, generation_handler, health_handler, settings_handler};
use crate::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

/// Build the main router for the service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(create_blog_router())
        .merge(create_settings_router())
        .merge(create_generation_router())
        .route("/health", get(health_handler::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new())
                .into_inner(),
        )
        .with_state(state)
}

fn create_blog_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/blogs",
            get(blogs_handler::list_blogs).post(blogs_handler::create_blog),
        )
        .route(
            "/api/blogs/:id",
            get(blogs_handler::get_blog)
                .put(blogs_handler::update_blog)
                .delete(blogs_handler::delete_blog),
        )
        .route(
            "/api/blogs/:id/hero-image",
            post(blogs_handler::generate_blog_hero_image),
        )
}

fn create_settings_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/settings",
            get(settings_handler::get_settings).put(settings_handler::update_settings),
        )
        .route(
            "/api/profile",
            get(settings_handler::get_profile).put(settings_handler::update_profile),
        )
}

fn create_generation_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/generate-outline",
            post(generation_handler::generate_outline),
        )
        .route(
            "/api/generate-content",
            post(generation_handler::generate_content),
        )
        .route(
            "/api/improve-content",
            post(generation_handler::improve_content),
        )
        .route(
            "/api/optimize-content",
            post(generation_handler::optimize_content),
        )
        .route("/api/generate-meta", post(generation_handler::generate_meta))
        .route("/api/topic-ideas", post(generation_handler::topic_ideas))
        .route("/api/summarize", post(generation_handler::summarize))
        .route(
            "/api/repurpose-content",
            post(generation_handler::repurpose_content),
        )
        .route("/api/visualize", post(generation_handler::visualize))
        .route("/api/generate-image", post(generation_handler::generate_image))
        .route("/api/generate-text", post(generation_handler::generate_text))
}

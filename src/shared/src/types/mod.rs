//! Shared type definitions for ContentCraft AI
//!
//! Data-model records owned by persistence and the JSON envelopes shared by
//! every HTTP surface.

pub mod api;
pub mod blog;
pub mod settings;

pub use api::{ErrorResponse, HealthStatus};
pub use blog::{BlogRecord, BlogUpdate, HeroImage, NewBlogRecord};
pub use settings::{ContentLength, ExportFormat, Profile, Settings, Theme};

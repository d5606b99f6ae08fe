//! Blog records and their embedded hero image

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hero image attached to a blog record. Has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroImage {
    pub id: String,
    /// Remote URL or `data:` URI
    pub url: String,
    pub caption: String,
    pub alt_text: String,
}

impl HeroImage {
    pub fn new(url: impl Into<String>, caption: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: url.into(),
            caption: caption.into(),
            alt_text: alt_text.into(),
        }
    }
}

/// A stored blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRecord {
    pub id: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub hero_image: Option<HeroImage>,
}

impl BlogRecord {
    /// Build a record with a fresh opaque id
    pub fn new(input: NewBlogRecord) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            content: input.content,
            created_at: now,
            updated_at: now,
            hero_image: input.hero_image,
        }
    }
}

/// Input for creating a blog record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogRecord {
    pub title: Option<String>,
    pub content: String,
    pub hero_image: Option<HeroImage>,
}

/// Field overwrites for an existing blog record. `None` leaves a field as is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub hero_image: Option<HeroImage>,
}

impl BlogUpdate {
    /// Overwrite the provided fields in place and bump `updated_at`
    pub fn apply(self, record: &mut BlogRecord) {
        if let Some(title) = self.title {
            record.title = Some(title);
        }
        if let Some(content) = self.content {
            record.content = content;
        }
        if let Some(hero_image) = self.hero_image {
            record.hero_image = Some(hero_image);
        }
        record.updated_at = Utc::now();
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.hero_image.is_none()
    }
}

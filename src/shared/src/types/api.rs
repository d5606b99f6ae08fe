//! API envelope types shared by every HTTP surface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard error envelope: `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub text_model: String,
    pub image_model: String,
    pub credentials_configured: bool,
}

//! Error handling for the ContentCraft service
//!
//! Every failure in the service is a [`ContentCraftError`]. Client-facing
//! variants (validation, missing records) render their message into the
//! `{ "error": ... }` envelope; everything else renders a fixed message and
//! the cause stays in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contentcraft_shared::ErrorResponse;
use thiserror::Error;

/// Result type alias for ContentCraft operations
pub type Result<T> = std::result::Result<T, ContentCraftError>;

/// Main error type for the ContentCraft service
#[derive(Error, Debug)]
pub enum ContentCraftError {
    /// Missing or malformed request fields
    #[error("Validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// Referenced record does not exist
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// Template registry or option misuse
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Transport failure or timeout talking to a provider
    #[error("Network error: {message}")]
    Network { message: String },

    /// Provider answered with a non-success status or a malformed envelope
    #[error("Upstream error: {service}: {message}")]
    Upstream { service: String, message: String },

    /// Provider output does not match the declared output schema
    #[error("Schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Internal service errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ContentCraftError {
    /// Get the HTTP status code that should be returned for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContentCraftError::Validation { .. } => StatusCode::BAD_REQUEST,
            ContentCraftError::NotFound { .. } => StatusCode::NOT_FOUND,
            ContentCraftError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ContentCraftError::Network { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ContentCraftError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ContentCraftError::SchemaMismatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ContentCraftError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ContentCraftError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code used in logs
    pub fn error_code(&self) -> &'static str {
        match self {
            ContentCraftError::Validation { .. } => "VALIDATION_ERROR",
            ContentCraftError::NotFound { .. } => "NOT_FOUND",
            ContentCraftError::Configuration { .. } => "CONFIG_ERROR",
            ContentCraftError::Network { .. } => "NETWORK_ERROR",
            ContentCraftError::Upstream { .. } => "UPSTREAM_ERROR",
            ContentCraftError::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            ContentCraftError::Serialization { .. } => "SERIALIZATION_ERROR",
            ContentCraftError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ContentCraftError::Network { .. }
                | ContentCraftError::Upstream { .. }
                | ContentCraftError::SchemaMismatch { .. }
        )
    }

    /// Generation failures are the errors a flow may replace with its fallback
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            ContentCraftError::Network { .. }
                | ContentCraftError::Upstream { .. }
                | ContentCraftError::SchemaMismatch { .. }
        )
    }

    /// Client errors carry their own message to the caller
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Keep client errors as they are, hide everything else behind `message`
    pub fn into_public(self, message: &str) -> Self {
        if self.is_client_error() {
            self
        } else {
            tracing::error!(code = self.error_code(), "{}: {}", message, self);
            ContentCraftError::internal(message)
        }
    }

    fn public_message(&self) -> String {
        match self {
            ContentCraftError::Validation { .. } | ContentCraftError::NotFound { .. } => {
                self.to_string()
            }
            ContentCraftError::Internal { message } => message.clone(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for ContentCraftError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.public_message()));

        (status, body).into_response()
    }
}

// Conversion implementations for external error types

impl From<reqwest::Error> for ContentCraftError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ContentCraftError::Upstream {
                service: "HTTP".to_string(),
                message: format!("malformed response body: {}", err),
            }
        } else if err.is_timeout() {
            ContentCraftError::Network {
                message: format!("request timed out: {}", err),
            }
        } else {
            ContentCraftError::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ContentCraftError {
    fn from(err: serde_json::Error) -> Self {
        ContentCraftError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<handlebars::RenderError> for ContentCraftError {
    fn from(err: handlebars::RenderError) -> Self {
        ContentCraftError::Configuration {
            message: format!("template render failed: {}", err),
        }
    }
}

impl From<handlebars::TemplateError> for ContentCraftError {
    fn from(err: handlebars::TemplateError) -> Self {
        ContentCraftError::Configuration {
            message: format!("template syntax error: {}", err),
        }
    }
}

impl From<config::ConfigError> for ContentCraftError {
    fn from(err: config::ConfigError) -> Self {
        ContentCraftError::Configuration {
            message: err.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for ContentCraftError {
    fn from(err: validator::ValidationErrors) -> Self {
        let field_errors = err.field_errors();
        let mut fields: Vec<&str> = field_errors.keys().copied().collect();
        fields.sort_unstable();

        let message = fields
            .iter()
            .map(|field| {
                let messages: Vec<String> = field_errors
                    .get(field)
                    .map(|errors| {
                        errors
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| "is invalid".to_string())
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                format!("{} {}", field, messages.join(", "))
            })
            .collect::<Vec<String>>()
            .join("; ");

        ContentCraftError::Validation {
            field: fields.join(","),
            message,
        }
    }
}

// Utility functions for creating specific error types

impl ContentCraftError {
    /// Create a validation error
    pub fn validation<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an upstream provider error
    pub fn upstream<S1: Into<String>, S2: Into<String>>(service: S1, message: S2) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Create a schema mismatch error
    pub fn schema_mismatch<S: Into<String>>(message: S) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

//! Configuration module for the ContentCraft service
//!
//! Values are layered: built-in defaults, then an optional config file, then
//! `CONTENTCRAFT__SECTION__KEY` environment variables. The Gemini credential
//! and model override also come from the conventional `GEMINI_API_KEY`
//! (or `GOOGLE_API_KEY`) and `GEMINI_MODEL` variables. A missing credential
//! never stops startup.

use contentcraft_shared::ServerConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::flows::RetryPolicy;
use crate::providers::{ImageOptions, ModelOptions};

/// Environment variable naming an optional config file
pub const CONFIG_FILE_ENV: &str = "CONTENTCRAFT_CONFIG_FILE";

/// Main configuration structure for the ContentCraft service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCraftConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Gemini API access
    pub gemini: GeminiConfig,

    /// Default sampling options for generation calls
    pub generation: GenerationConfig,

    /// Bounded retry used by the retrying text flow
    pub retry: RetryConfig,
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub timeout_seconds: u64,
}

/// Sampling defaults applied to every generation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
    pub image_aspect_ratio: String,
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for ContentCraftConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            gemini: GeminiConfig::default(),
            generation: GenerationConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .unwrap_or_default();

        Self {
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            text_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            image_model: "imagen-3.0-generate-002".to_string(),
            timeout_seconds: 60,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        let options = ModelOptions::default();
        Self {
            temperature: options.temperature,
            max_output_tokens: options.max_output_tokens,
            top_p: options.top_p,
            top_k: options.top_k,
            image_aspect_ratio: ImageOptions::default().aspect_ratio,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 1000,
            max_delay_ms: 30_000,
            backoff_multiplier: 2.0,
        }
    }
}

impl GeminiConfig {
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl GenerationConfig {
    pub fn model_options(&self) -> ModelOptions {
        ModelOptions {
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            top_p: self.top_p,
            top_k: self.top_k,
            json_output: false,
        }
    }

    pub fn image_options(&self) -> ImageOptions {
        ImageOptions {
            aspect_ratio: self.image_aspect_ratio.clone(),
            ..ImageOptions::default()
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            backoff_multiplier: self.backoff_multiplier,
        }
    }
}

impl ContentCraftConfig {
    /// Load configuration, reading the file named by `CONTENTCRAFT_CONFIG_FILE` if set
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::load(file.as_deref())
    }

    /// Load configuration from defaults, an optional file and the environment
    pub fn load(config_file: Option<&str>) -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let mut cfg = config::Config::builder();

        // Start with default configuration
        cfg = cfg.add_source(config::Config::try_from(&ContentCraftConfig::default())?);

        if let Some(path) = config_file {
            cfg = cfg.add_source(config::File::with_name(path).required(false));
        }

        cfg = cfg.add_source(
            config::Environment::with_prefix("CONTENTCRAFT")
                .separator("__")
                .try_parsing(true),
        );

        cfg.build()?.try_deserialize()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if self.gemini.base_url.trim().is_empty() {
            return Err("Gemini base URL must not be empty".to_string());
        }

        self.generation
            .model_options()
            .validate()
            .map_err(|e| e.to_string())?;

        if self.retry.max_attempts == 0 {
            return Err("Max retry attempts must be greater than 0".to_string());
        }

        if self.retry.backoff_multiplier < 1.0 {
            return Err("Backoff multiplier must be at least 1.0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = ContentCraftConfig::default();
        assert_eq!(config.server.port, 9002);
        assert_eq!(config.generation.temperature, 0.7);
        assert_eq!(config.generation.max_output_tokens, 2048);
        assert_eq!(config.generation.top_p, 0.9);
        assert_eq!(config.generation.top_k, 40);
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.initial_delay_ms, 1000);
    }

    #[test]
    fn test_config_validation() {
        let config = ContentCraftConfig::default();
        assert!(config.validate().is_ok());

        let mut invalid = config.clone();
        invalid.server.port = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = config.clone();
        invalid.retry.max_attempts = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = config;
        invalid.generation.temperature = 1.5;
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_retry_policy_from_config() {
        let policy = RetryConfig::default().policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_for(0), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(1), Duration::from_millis(2000));
    }

    #[test]
    #[serial]
    fn test_missing_credentials_is_not_fatal() {
        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("GOOGLE_API_KEY");

        let config = ContentCraftConfig::load(None).unwrap();
        assert!(!config.gemini.has_credentials());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_override_from_env() {
        std::env::set_var("GEMINI_API_KEY", "test-key");
        std::env::set_var("GEMINI_MODEL", "gemini-1.5-pro");
        std::env::set_var("CONTENTCRAFT__SERVER__PORT", "8123");

        let config = ContentCraftConfig::load(None).unwrap();

        std::env::remove_var("GEMINI_API_KEY");
        std::env::remove_var("GEMINI_MODEL");
        std::env::remove_var("CONTENTCRAFT__SERVER__PORT");

        assert_eq!(config.gemini.api_key, "test-key");
        assert_eq!(config.gemini.text_model, "gemini-1.5-pro");
        assert_eq!(config.server.port, 8123);
    }
}

//! Google Generative Language API client
//!
//! Text goes through `models/{model}:generateContent`, images through the
//! Imagen `models/{model}:predict` endpoint. Both authenticate with the
//! `key` query parameter.

use super::{GeneratedImage, ImageGenerator, ImageOptions, ModelOptions, TextGenerator};
use crate::config::GeminiConfig;
use crate::error::{ContentCraftError, Result};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

const SERVICE: &str = "gemini";

/// Gemini API client shared by all requests
#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
    text_model: String,
    image_model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("has_credentials", &!self.api_key.is_empty())
            .finish()
    }
}

// Gemini API types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: String,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

impl GeminiClient {
    /// Create a client from configuration
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ContentCraftError::configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.api_key.trim().to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            client,
        })
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/v1beta/models/{}:{}", self.base_url, model, method)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, url: &str, body: &B) -> Result<R> {
        if !self.has_credentials() {
            return Err(ContentCraftError::upstream(
                SERVICE,
                "no API key configured; set GEMINI_API_KEY",
            ));
        }

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Gemini API returned {}", status);
            return Err(ContentCraftError::upstream(
                SERVICE,
                format!("HTTP {}: {}", status, text),
            ));
        }

        serde_json::from_str(&text).map_err(|e| {
            ContentCraftError::upstream(SERVICE, format!("malformed response envelope: {}", e))
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str, options: &ModelOptions) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![GeminiContent {
                role: "user".to_string(),
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: options.temperature,
                top_k: options.top_k,
                top_p: options.top_p,
                max_output_tokens: options.max_output_tokens,
                response_mime_type: options
                    .json_output
                    .then(|| "application/json".to_string()),
            },
        };

        let url = self.endpoint(&self.text_model, "generateContent");
        let response: GenerateContentResponse = self.post(&url, &request).await?;

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            ContentCraftError::upstream(SERVICE, "response contained no candidates")
        })?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ContentCraftError::upstream(
                SERVICE,
                format!(
                    "candidate had no text (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            ));
        }

        debug!("Gemini returned {} characters", text.len());
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.text_model
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(
        &self,
        prompt: &str,
        options: &ImageOptions,
    ) -> Result<GeneratedImage> {
        let request = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: options.sample_count,
                aspect_ratio: options.aspect_ratio.clone(),
            },
        };

        let url = self.endpoint(&self.image_model, "predict");
        let response: PredictResponse = self.post(&url, &request).await?;

        let prediction = response
            .predictions
            .into_iter()
            .find(|p| p.bytes_base64_encoded.is_some())
            .ok_or_else(|| {
                ContentCraftError::upstream(SERVICE, "response contained no image predictions")
            })?;

        let encoded = prediction.bytes_base64_encoded.unwrap_or_default();
        let mime_type = prediction.mime_type.as_deref().unwrap_or("image/png");
        GeneratedImage::from_base64(mime_type, &encoded)
    }

    fn model_name(&self) -> &str {
        &self.image_model
    }
}

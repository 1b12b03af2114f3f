//! Stability AI text-to-image client.
//!
//! Thin HTTP wrapper for `/v1/generation/{engine}/text-to-image` with a fixed
//! sampling setup. Pure parsing in `parse_response` for testability.

use super::config::StabilityConfig;
use super::types::{ImageProvider, ProviderError};

const CFG_SCALE: u32 = 7;
const IMAGE_SIZE: u32 = 1024;
const STEPS: u32 = 30;
const SAMPLES: u32 = 1;

// =============================================================================
// CLIENT
// =============================================================================

pub struct StabilityClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl StabilityClient {
    /// Build a client for the configured engine.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: StabilityConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::HttpClientBuild(e.to_string()))?;
        let endpoint = format!("{}/v1/generation/{}/text-to-image", config.base_url, config.engine);
        Ok(Self { http, api_key: config.api_key, endpoint })
    }

    async fn text_to_image(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = ApiRequest {
            text_prompts: [TextPrompt { text: prompt }],
            cfg_scale: CFG_SCALE,
            height: IMAGE_SIZE,
            width: IMAGE_SIZE,
            steps: STEPS,
            samples: SAMPLES,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::ApiRequest(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::ApiRequest(e.to_string()))?;

        if !status.is_success() {
            return Err(ProviderError::ApiResponse { status: status.as_u16(), body: text });
        }

        parse_response(&text)
    }
}

#[async_trait::async_trait]
impl ImageProvider for StabilityClient {
    fn name(&self) -> &'static str {
        "stability"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.text_to_image(prompt).await
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    text_prompts: [TextPrompt<'a>; 1],
    cfg_scale: u32,
    height: u32,
    width: u32,
    steps: u32,
    samples: u32,
}

#[derive(serde::Serialize)]
struct TextPrompt<'a> {
    text: &'a str,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    artifacts: Vec<Artifact>,
}

#[derive(serde::Deserialize)]
struct Artifact {
    base64: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<String, ProviderError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| ProviderError::ApiParse(e.to_string()))?;

    api.artifacts
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::ApiParse("response contained no artifacts".into()))?
        .base64
        .ok_or_else(|| ProviderError::ApiParse("artifact missing base64".into()))
}

#[cfg(test)]
#[path = "stability_test.rs"]
mod tests;

//! Google Imagen (Vertex AI `predict`) client.
//!
//! Thin HTTP wrapper for the publisher-model `:predict` endpoint. Pure parsing
//! in `parse_response` for testability.

use super::config::ImagenConfig;
use super::types::{ImageProvider, ProviderError};

const SAMPLE_COUNT: u32 = 1;

// =============================================================================
// CLIENT
// =============================================================================

pub struct ImagenClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ImagenClient {
    /// Build a client for the configured project, location and model.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(config: ImagenConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ProviderError::HttpClientBuild(e.to_string()))?;
        let endpoint = predict_url(&config);
        Ok(Self { http, api_key: config.api_key, endpoint })
    }

    async fn predict(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = ApiRequest {
            instances: [Instance { prompt }],
            parameters: Parameters { sample_count: SAMPLE_COUNT },
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
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
impl ImageProvider for ImagenClient {
    fn name(&self) -> &'static str {
        "imagen"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.predict(prompt).await
    }
}

fn predict_url(config: &ImagenConfig) -> String {
    format!(
        "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:predict",
        config.base_url, config.project_id, config.location, config.model
    )
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    instances: [Instance<'a>; 1],
    parameters: Parameters,
}

#[derive(serde::Serialize)]
struct Instance<'a> {
    prompt: &'a str,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_response(json: &str) -> Result<String, ProviderError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| ProviderError::ApiParse(e.to_string()))?;

    api.predictions
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::ApiParse("response contained no predictions".into()))?
        .bytes_base64_encoded
        .ok_or_else(|| ProviderError::ApiParse("prediction missing bytesBase64Encoded".into()))
}

#[cfg(test)]
#[path = "imagen_test.rs"]
mod tests;

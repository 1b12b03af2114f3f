//! REST API helpers for communicating with the generation proxy.
//!
//! ERROR HANDLING
//! ==============
//! A non-2xx answer that still carries the `{error}` envelope is returned as
//! a normal [`GenerationResponse::Error`] so the proxy's message reaches the
//! user. Only bodies that cannot be decoded become an [`ApiError`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use envelope::{GENERATE_IMAGE_PATH, GenerationRequest, GenerationResponse};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("request failed with status {status}")]
    Status { status: u16 },
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// The proxy call. Enables mocking in screen tests.
#[async_trait::async_trait]
pub trait GenerateApi: Send + Sync {
    /// Submit `prompt` and return the proxy's envelope.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure or an undecodable body.
    async fn generate_image(&self, prompt: &str) -> Result<GenerationResponse, ApiError>;
}

/// reqwest-backed proxy client.
pub struct HttpGenerateApi {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpGenerateApi {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the HTTP client fails to build.
    pub fn new(base_url: &str, access_token: Option<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned(), access_token })
    }

    /// `GET /healthz`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for a non-success answer.
    pub async fn ping(&self) -> Result<(), ApiError> {
        let resp = self.http.get(format!("{}/healthz", self.base_url)).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Status { status: resp.status().as_u16() });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl GenerateApi for HttpGenerateApi {
    async fn generate_image(&self, prompt: &str) -> Result<GenerationResponse, ApiError> {
        let mut request = self
            .http
            .post(generate_endpoint(&self.base_url))
            .json(&GenerationRequest::new(prompt));
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        decode_response(status, &body)
    }
}

fn generate_endpoint(base_url: &str) -> String {
    format!("{base_url}{GENERATE_IMAGE_PATH}")
}

fn decode_response(status: u16, body: &str) -> Result<GenerationResponse, ApiError> {
    match serde_json::from_str::<GenerationResponse>(body) {
        Ok(resp) => Ok(resp),
        Err(_) if !(200..300).contains(&status) => Err(ApiError::Status { status }),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}

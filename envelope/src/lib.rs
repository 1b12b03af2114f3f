//! Shared request/response envelope for the image generation endpoint.
//!
//! This crate owns the wire representation used by both `server` and `client`.
//! A response carries exactly one of `image` or `error`; decoding rejects
//! bodies that carry both or neither.

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Path the proxy is mounted at.
pub const GENERATE_IMAGE_PATH: &str = "/functions/v1/generate-image";

/// Error message for a request without a usable prompt.
pub const MISSING_PROMPT_MESSAGE: &str = "Missing prompt in request body";

const UPSTREAM_FAILURE_PREFIX: &str = "Failed to generate image.";

/// Build the error message returned when the upstream provider rejects a call.
#[must_use]
pub fn upstream_failure_message(upstream_text: &str) -> String {
    format!("{UPSTREAM_FAILURE_PREFIX} {upstream_text}")
}

/// Wrap a base64 PNG payload as a displayable data URL.
#[must_use]
pub fn image_data_url(base64: &str) -> String {
    format!("data:image/png;base64,{base64}")
}

/// `true` when the prompt is empty or whitespace only.
#[must_use]
pub fn is_blank_prompt(prompt: &str) -> bool {
    prompt.trim().is_empty()
}

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code attached to logged failures.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// Error returned when a response body violates the exactly-one-field rule.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Both `image` and `error` were present.
    #[error("response carries both image and error")]
    Ambiguous,
    /// Neither `image` nor `error` was present.
    #[error("response carries neither image nor error")]
    Empty,
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// Body of a generation request: `{"prompt": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
}

impl GenerationRequest {
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into() }
    }
}

/// Normalized proxy response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GenerationResponse {
    /// Base64-encoded image payload.
    Image { image: String },
    /// Human-readable failure message.
    Error { error: String },
}

impl GenerationResponse {
    #[must_use]
    pub fn image(image: impl Into<String>) -> Self {
        Self::Image { image: image.into() }
    }

    #[must_use]
    pub fn error(error: impl Into<String>) -> Self {
        Self::Error { error: error.into() }
    }

    /// Convert into a `Result`, with the error message on the `Err` side.
    ///
    /// # Errors
    ///
    /// Returns the error message when the response is [`GenerationResponse::Error`].
    pub fn into_result(self) -> Result<String, String> {
        match self {
            Self::Image { image } => Ok(image),
            Self::Error { error } => Err(error),
        }
    }
}

#[derive(Deserialize)]
struct RawResponse {
    image: Option<String>,
    error: Option<String>,
}

impl TryFrom<RawResponse> for GenerationResponse {
    type Error = EnvelopeError;

    fn try_from(raw: RawResponse) -> Result<Self, EnvelopeError> {
        match (raw.image, raw.error) {
            (Some(image), None) => Ok(Self::Image { image }),
            (None, Some(error)) => Ok(Self::Error { error }),
            (Some(_), Some(_)) => Err(EnvelopeError::Ambiguous),
            (None, None) => Err(EnvelopeError::Empty),
        }
    }
}

impl<'de> Deserialize<'de> for GenerationResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawResponse::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

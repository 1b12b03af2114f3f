//! Prompt validation and the single upstream generation call.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is a [`GenerationError`]; the route layer turns it into the
//! `{error}` envelope with [`GenerationError::status`]. Nothing here retries.

use axum::http::StatusCode;
use envelope::{ErrorCode, MISSING_PROMPT_MESSAGE, is_blank_prompt, upstream_failure_message};
use tracing::{error, warn};

use crate::provider::{ImageProvider, ProviderError};

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Provider credentials are absent; fatal until the deployment is fixed.
    #[error("{0}")]
    Configuration(String),

    /// Missing or blank prompt.
    #[error("{}", MISSING_PROMPT_MESSAGE)]
    Validation,

    /// Provider answered with a non-success status.
    #[error("{}", upstream_failure_message(.body))]
    Upstream { status: u16, body: String },

    /// Anything else: transport failure, malformed body, unexpected shape.
    #[error("{0}")]
    Unexpected(String),
}

impl GenerationError {
    /// HTTP status the proxy answers with.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Configuration(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl ErrorCode for GenerationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "E_CONFIGURATION",
            Self::Validation => "E_VALIDATION",
            Self::Upstream { .. } => "E_UPSTREAM",
            Self::Unexpected(_) => "E_UNEXPECTED",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Upstream { status: 429 | 500..=599, .. })
    }
}

impl From<ProviderError> for GenerationError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiResponse { status, body } => Self::Upstream { status, body },
            ProviderError::MissingCredential { message } => Self::Configuration(message),
            other => Self::Unexpected(other.to_string()),
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Extract a usable prompt from a raw JSON request body.
///
/// An empty body, a missing or non-string `prompt`, or a blank prompt is a
/// [`GenerationError::Validation`]. A body that is not JSON is
/// [`GenerationError::Unexpected`].
///
/// # Errors
///
/// See above.
pub fn parse_prompt(body: &[u8]) -> Result<String, GenerationError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(GenerationError::Validation);
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| GenerationError::Unexpected(e.to_string()))?;

    match value.get("prompt").and_then(serde_json::Value::as_str) {
        Some(prompt) if !is_blank_prompt(prompt) => Ok(prompt.to_owned()),
        _ => Err(GenerationError::Validation),
    }
}

// =============================================================================
// GENERATION
// =============================================================================

/// Make exactly one provider call for `prompt`.
///
/// # Errors
///
/// Returns [`GenerationError::Upstream`] for a non-success provider status and
/// [`GenerationError::Unexpected`] for any other provider failure.
pub async fn generate_image(provider: &dyn ImageProvider, prompt: &str) -> Result<String, GenerationError> {
    match provider.generate(prompt).await {
        Ok(image) => Ok(image),
        Err(err) => {
            let code = err.error_code();
            let retryable = err.retryable();
            let mapped = GenerationError::from(err);
            match &mapped {
                GenerationError::Upstream { status, body } => {
                    warn!(provider = provider.name(), code, status, retryable, body = %body, "upstream rejected generation");
                }
                _ => {
                    error!(provider = provider.name(), code, error = %mapped, "image generation failed");
                }
            }
            Err(mapped)
        }
    }
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;

//! Provider types — the image generation capability and its errors.
//!
//! Provider-neutral pieces shared by the Imagen and Stability clients. The
//! HTTP handler depends only on [`ImageProvider`], never on provider wire
//! shapes.

use envelope::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by provider configuration and upstream calls.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// A required credential is absent from the environment.
    #[error("{message}")]
    MissingCredential { message: String },

    /// The HTTP request to the provider failed before a response arrived.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body did not have the expected shape.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for ProviderError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "E_CONFIG_PARSE",
            Self::MissingCredential { .. } => "E_MISSING_CREDENTIAL",
            Self::ApiRequest(_) => "E_API_REQUEST",
            Self::ApiResponse { .. } => "E_API_RESPONSE",
            Self::ApiParse(_) => "E_API_PARSE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::ApiRequest(_) | Self::ApiResponse { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// IMAGE PROVIDER TRAIT
// =============================================================================

/// Text-to-image capability. One implementation per upstream provider;
/// enables mocking in tests.
#[async_trait::async_trait]
pub trait ImageProvider: Send + Sync {
    /// Short provider label used in logs (e.g. `"imagen"`).
    fn name(&self) -> &'static str;

    /// Generate one image for `prompt` and return its base64 payload.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ApiResponse`] when the provider answers with a
    /// non-success status, and another variant when the call or the response
    /// parsing fails.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;

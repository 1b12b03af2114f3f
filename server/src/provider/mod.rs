//! Provider — text-to-image upstream adapters.
//!
//! DESIGN
//! ======
//! Configuration comes from environment variables. The `ImageClient` enum
//! dispatches to Google Imagen or Stability AI based on `IMAGE_PROVIDER`;
//! exactly one provider is active per deployment and there is no fallback
//! between them.

pub mod config;
pub mod imagen;
pub mod stability;
pub mod types;

use config::ProviderConfig;
pub use types::{ImageProvider, ProviderError};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete image client that dispatches to either Imagen or Stability.
///
/// Configured from environment variables by [`ImageClient::from_env`].
pub enum ImageClient {
    Imagen(imagen::ImagenClient),
    Stability(stability::StabilityClient),
}

impl ImageClient {
    /// Build an image client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is missing, the provider name is
    /// unknown, or the HTTP client fails to build.
    pub fn from_env() -> Result<Self, ProviderError> {
        let config = ProviderConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an image client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: ProviderConfig) -> Result<Self, ProviderError> {
        Ok(match config {
            ProviderConfig::Imagen(cfg) => Self::Imagen(imagen::ImagenClient::new(cfg)?),
            ProviderConfig::Stability(cfg) => Self::Stability(stability::StabilityClient::new(cfg)?),
        })
    }
}

#[async_trait::async_trait]
impl ImageProvider for ImageClient {
    fn name(&self) -> &'static str {
        match self {
            Self::Imagen(c) => c.name(),
            Self::Stability(c) => c.name(),
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        match self {
            Self::Imagen(c) => c.generate(prompt).await,
            Self::Stability(c) => c.generate(prompt).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::config::{StabilityConfig, DEFAULT_STABILITY_ENGINE};
    use crate::state::test_helpers;

    #[test]
    fn from_config_selects_imagen() {
        let config = ProviderConfig::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some("k".into()),
            "GOOGLE_PROJECT_ID" => Some("p".into()),
            _ => None,
        })
        .unwrap();
        let client = ImageClient::from_config(config).unwrap();
        assert_eq!(client.name(), "imagen");
    }

    #[tokio::test]
    async fn dispatches_to_stability() {
        let upstream = test_helpers::spawn_fake_upstream(200, r#"{"artifacts":[{"base64":"BBBB"}]}"#).await;
        let client = ImageClient::from_config(ProviderConfig::Stability(StabilityConfig {
            api_key: "sk".into(),
            engine: DEFAULT_STABILITY_ENGINE.into(),
            base_url: upstream.base_url.clone(),
        }))
        .unwrap();

        assert_eq!(client.name(), "stability");
        assert_eq!(client.generate("a fox").await.unwrap(), "BBBB");
        assert_eq!(upstream.requests().len(), 1);
    }
}

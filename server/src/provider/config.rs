//! Provider configuration parsed from environment variables.

use super::types::ProviderError;

pub const DEFAULT_IMAGEN_BASE_URL: &str = "https://us-central1-aiplatform.googleapis.com";
pub const DEFAULT_GOOGLE_LOCATION: &str = "us-central1";
pub const DEFAULT_IMAGEN_MODEL: &str = "imagegeneration@006";

pub const DEFAULT_STABILITY_BASE_URL: &str = "https://api.stability.ai";
pub const DEFAULT_STABILITY_ENGINE: &str = "stable-diffusion-xl-1024-v1-0";

const IMAGEN_MISSING_MESSAGE: &str = "Missing GEMINI_API_KEY or GOOGLE_PROJECT_ID in environment.";
const STABILITY_MISSING_MESSAGE: &str = "Missing STABILITY_API_KEY in environment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Imagen,
    Stability,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagenConfig {
    pub api_key: String,
    pub project_id: String,
    pub location: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StabilityConfig {
    pub api_key: String,
    pub engine: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    Imagen(ImagenConfig),
    Stability(StabilityConfig),
}

impl ProviderConfig {
    /// Build typed provider config from environment variables.
    ///
    /// Optional:
    /// - `IMAGE_PROVIDER`: `imagen` (default) or `stability`
    /// - `IMAGE_PROVIDER_BASE_URL`: overrides the upstream origin
    ///
    /// Imagen requires `GEMINI_API_KEY` and `GOOGLE_PROJECT_ID`, and reads
    /// `GOOGLE_LOCATION` / `IMAGEN_MODEL` when set. Stability requires
    /// `STABILITY_API_KEY` and reads `STABILITY_ENGINE` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::MissingCredential`] when a required credential
    /// is absent or empty, and [`ProviderError::ConfigParse`] for an unknown
    /// provider name.
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ProviderConfig::from_env`] but reading through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ProviderConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let kind = parse_provider(get("IMAGE_PROVIDER").as_deref())?;
        let base_url = get("IMAGE_PROVIDER_BASE_URL").map(|url| url.trim_end_matches('/').to_string());

        match kind {
            ProviderKind::Imagen => {
                let (Some(api_key), Some(project_id)) = (get("GEMINI_API_KEY"), get("GOOGLE_PROJECT_ID")) else {
                    return Err(ProviderError::MissingCredential { message: IMAGEN_MISSING_MESSAGE.into() });
                };
                Ok(Self::Imagen(ImagenConfig {
                    api_key,
                    project_id,
                    location: get("GOOGLE_LOCATION").unwrap_or_else(|| DEFAULT_GOOGLE_LOCATION.to_string()),
                    model: get("IMAGEN_MODEL").unwrap_or_else(|| DEFAULT_IMAGEN_MODEL.to_string()),
                    base_url: base_url.unwrap_or_else(|| DEFAULT_IMAGEN_BASE_URL.to_string()),
                }))
            }
            ProviderKind::Stability => {
                let Some(api_key) = get("STABILITY_API_KEY") else {
                    return Err(ProviderError::MissingCredential { message: STABILITY_MISSING_MESSAGE.into() });
                };
                Ok(Self::Stability(StabilityConfig {
                    api_key,
                    engine: get("STABILITY_ENGINE").unwrap_or_else(|| DEFAULT_STABILITY_ENGINE.to_string()),
                    base_url: base_url.unwrap_or_else(|| DEFAULT_STABILITY_BASE_URL.to_string()),
                }))
            }
        }
    }
}

fn parse_provider(raw: Option<&str>) -> Result<ProviderKind, ProviderError> {
    match raw.map(str::trim).unwrap_or("imagen") {
        "imagen" | "google" => Ok(ProviderKind::Imagen),
        "stability" => Ok(ProviderKind::Stability),
        other => Err(ProviderError::ConfigParse(format!("unknown IMAGE_PROVIDER: {other}"))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

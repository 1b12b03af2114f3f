//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the configured image provider, or the reason no provider could
//! be configured. The proxy is otherwise stateless across requests.

use std::sync::Arc;

use crate::provider::ImageProvider;

// =============================================================================
// PROVIDER SLOT
// =============================================================================

/// Outcome of provider configuration at startup.
///
/// A misconfigured deployment still serves requests so each caller gets a
/// 500 naming the missing credential instead of a dropped connection.
#[derive(Clone)]
pub enum ProviderSlot {
    Ready(Arc<dyn ImageProvider>),
    Unconfigured(String),
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the provider is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub provider: ProviderSlot,
}

impl AppState {
    #[must_use]
    pub fn new(provider: Arc<dyn ImageProvider>) -> Self {
        Self { provider: ProviderSlot::Ready(provider) }
    }

    #[must_use]
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self { provider: ProviderSlot::Unconfigured(reason.into()) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the generation endpoint and a health probe under a single Axum
//! router. CORS is open to every origin so browser and mobile clients can
//! call the proxy directly.

pub mod generate;

use axum::Router;
use axum::http::{HeaderName, StatusCode, header};
use axum::routing::{any, get};
use envelope::GENERATE_IMAGE_PATH;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ]);

    Router::new()
        .route(GENERATE_IMAGE_PATH, any(generate::generate_image))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

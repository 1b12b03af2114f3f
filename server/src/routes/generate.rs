//! Generation route — translates HTTP to the generation service and back.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use envelope::{ErrorCode, GenerationResponse};

use crate::services::generate::{self as generate_svc, GenerationError};
use crate::state::{AppState, ProviderSlot};

/// `ANY /functions/v1/generate-image` — prompt in, base64 image out.
///
/// `OPTIONS` answers the preflight with an empty 200. Every other method is
/// treated as a generation request.
pub async fn generate_image(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    match run(&state, &body).await {
        Ok(image) => (StatusCode::OK, Json(GenerationResponse::image(image))).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn run(state: &AppState, body: &[u8]) -> Result<String, GenerationError> {
    let provider = match &state.provider {
        ProviderSlot::Ready(provider) => provider,
        ProviderSlot::Unconfigured(reason) => {
            let err = GenerationError::Configuration(reason.clone());
            tracing::error!(code = err.error_code(), error = %err, "image provider not configured");
            return Err(err);
        }
    };

    let prompt = generate_svc::parse_prompt(body).inspect_err(|err| match err {
        GenerationError::Validation => tracing::debug!(code = err.error_code(), "request without prompt"),
        _ => tracing::error!(code = err.error_code(), error = %err, "request body parse failed"),
    })?;

    generate_svc::generate_image(provider.as_ref(), &prompt).await
}

fn error_response(err: &GenerationError) -> Response {
    (err.status(), Json(GenerationResponse::error(err.to_string()))).into_response()
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;

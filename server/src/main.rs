mod provider;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use envelope::ErrorCode;

use crate::provider::{ImageClient, ImageProvider};
use crate::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Missing provider config is non-fatal at startup: every request reports it as a 500.
    let state = match ImageClient::from_env() {
        Ok(client) => {
            tracing::info!(provider = client.name(), "image provider initialized");
            AppState::new(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(code = e.error_code(), error = %e, "image provider not configured; requests will fail with 500");
            AppState::unconfigured(e.to_string())
        }
    };

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "image proxy listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server failed");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

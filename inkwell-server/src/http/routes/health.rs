//! Health and store status endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db;
use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Store connectivity response
#[derive(Serialize)]
pub struct StatusResponse {
    pub database: bool,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /status - probe the store
async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let database = match db::ping(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("store connectivity check failed: {}", e);
            false
        }
    };

    Json(StatusResponse { database })
}

/// Health routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/status", get(status))
}

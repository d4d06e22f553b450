//! HTTP routes of the clip site.
//!
//! Every route, including the fallback, sits behind the request gate.

use std::sync::Arc;

use axum::{
    Router,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};

use crate::config::ServerConfig;
use crate::gate::{RequestGate, gate_middleware};

pub mod clip;
pub mod tokenset;

/// State shared by page handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

/// Build the application router with the gate derived from `config`.
#[must_use]
pub fn router(config: ServerConfig) -> Router {
    let gate = RequestGate::from_config(&config);
    router_with_gate(Arc::new(config), Arc::new(gate))
}

/// Build the application router around an existing gate.
#[must_use]
pub fn router_with_gate(config: Arc<ServerConfig>, gate: Arc<RequestGate>) -> Router {
    Router::new()
        .route("/clip/{id}", get(clip::load))
        .route("/tokenset", get(tokenset::bridge_root))
        .route("/tokenset/", get(tokenset::bridge_root))
        .route("/tokenset/{*slug}", get(tokenset::bridge))
        .fallback(not_found)
        .with_state(AppState { config })
        .layer(middleware::from_fn_with_state(gate, gate_middleware))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

//! Clip page data loader.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use super::AppState;

/// Data a clip page renders from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipPage {
    /// Clip identifier from the route.
    pub id: String,
    /// Domain the clip media is served from, empty when unconfigured.
    pub domain: String,
}

/// `GET /clip/{id}`
pub async fn load(State(state): State<AppState>, Path(id): Path<String>) -> Json<ClipPage> {
    let domain = state.config.cdn_domain.clone().unwrap_or_default();
    tracing::debug!(%id, "loading clip page");
    Json(ClipPage { id, domain })
}

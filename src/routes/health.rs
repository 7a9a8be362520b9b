//! Operator endpoints: liveness and forced reload.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::manifest::Manifest;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub loaded_stories: usize,
    pub components_count: usize,
    pub source: &'static str,
    pub timestamp: String,
}

impl HealthResponse {
    fn new(status: &'static str, manifest: Option<&Manifest>) -> Self {
        Self {
            status,
            loaded_stories: manifest.map_or(0, Manifest::story_count),
            components_count: manifest.map_or(0, Manifest::len),
            source: manifest.map_or("unknown", |m| m.source().as_str()),
            timestamp: now_rfc3339(),
        }
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}

/// `GET /healthz`: current counts and provenance.
pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let manifest = state.current().await;
    Json(HealthResponse::new("ok", manifest.as_deref()))
}

/// `POST /reload`: reload the manifest now, then report like `/healthz`.
pub async fn reload(State(state): State<AppState>) -> Json<HealthResponse> {
    let manifest = state.reload().await;
    Json(HealthResponse::new("reloaded", manifest.as_deref()))
}

/// Liveness endpoint
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the catalog database answered a trivial query
    pub database: bool,
}

/// GET /api/health
pub async fn health(State(app_state): State<AppState>) -> Json<HealthResponse> {
    let database = match app_state.music_service.total_musics().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

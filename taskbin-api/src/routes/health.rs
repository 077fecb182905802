/// Health probe
///
/// `GET /health` answers even when the database is down, reporting
/// `degraded` instead of failing, so an orchestrator can tell a dead
/// process apart from an unreachable backend.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use taskbin_shared::db::pool;

/// Body of a health probe response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// Liveness plus a database round-trip
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = pool::health_check(&state.db).await.is_ok();

    Json(HealthResponse {
        status: if db_ok { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: if db_ok { "connected" } else { "disconnected" },
    })
}

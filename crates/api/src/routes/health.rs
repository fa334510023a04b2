//! Liveness and dependency health.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `ok` when every dependency answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub cache_healthy: bool,
}

/// GET /health
///
/// Answers 200 even when degraded; the body names the failing dependency.
async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let (db, cache) = tokio::join!(
        ticketing_db::health_check(&state.pool),
        state.cache.ping()
    );
    if let Err(error) = &cache {
        tracing::warn!(%error, "Cache ping failed");
    }

    let db_healthy = db.is_ok();
    let cache_healthy = cache.is_ok();
    Json(HealthReport {
        status: if db_healthy && cache_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        cache_healthy,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}

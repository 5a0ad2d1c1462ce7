/// Health check endpoints
///
/// # Endpoints
///
/// ```text
/// GET /health   -> 200 always; reports database connectivity
/// GET /ready    -> 200 when the database answers, 503 otherwise
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    /// Application version
    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,
}

/// Liveness handler
///
/// Stays 200 while the process runs so orchestrators don't restart it over a
/// database outage; the body says whether the database is reachable.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = state.store.ping().await.is_ok();

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    })
}

/// Readiness handler
///
/// # Errors
///
/// - `503 Service Unavailable`: the database cannot be reached
/// - `500 Internal Server Error`: the database check failed for another reason
pub async fn readiness(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.store.ping().await?;

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: "connected".to_string(),
    }))
}

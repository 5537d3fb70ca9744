//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::state::ClinicState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub version: &'static str,
}

/// `GET /health`: liveness plus a storage round trip.
pub async fn check(State(state): State<ClinicState>) -> Result<Json<HealthResponse>, ApiError> {
    let conn = state.open_db()?;
    let database = conn
        .query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
        .is_ok();

    Ok(Json(HealthResponse {
        status: "ok",
        database,
        version: crate::config::APP_VERSION,
    }))
}

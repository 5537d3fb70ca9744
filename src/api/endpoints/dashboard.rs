//! Dashboard endpoint.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::db;
use crate::models::DashboardSummary;
use crate::state::ClinicState;

/// `GET /`: totals and status/gender breakdowns.
pub async fn summary(State(state): State<ClinicState>) -> Result<Json<DashboardSummary>, ApiError> {
    let conn = state.open_db()?;
    let summary = db::dashboard_summary(&conn)?;
    Ok(Json(summary))
}

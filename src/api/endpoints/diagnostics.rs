//! Diagnostic endpoints, always scoped to one patient.
//!
//! - `GET /diagnostics/:patient_id`: patient + diagnostics, most recent first
//! - `POST /diagnostics/:patient_id`: add a diagnostic note

use axum::extract::{Path, State};
use axum::{Form, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::Notice;
use crate::db;
use crate::models::*;
use crate::state::ClinicState;

#[derive(Serialize)]
pub struct DiagnosticsResponse {
    pub patient: Patient,
    pub diagnostics: Vec<Diagnostic>,
}

/// `GET /diagnostics/:patient_id`
pub async fn list(
    State(state): State<ClinicState>,
    Path(patient_id): Path<i64>,
) -> Result<Json<DiagnosticsResponse>, ApiError> {
    let conn = state.open_db()?;
    let patient = db::require_patient(&conn, patient_id)?;
    let diagnostics = db::list_diagnostics_for_patient(&conn, patient_id)?;
    Ok(Json(DiagnosticsResponse {
        patient,
        diagnostics,
    }))
}

/// `POST /diagnostics/:patient_id`
pub async fn create(
    State(state): State<ClinicState>,
    Path(patient_id): Path<i64>,
    Form(fields): Form<DiagnosticFields>,
) -> Result<Notice, ApiError> {
    let conn = state.open_db()?;
    let id = db::insert_diagnostic(&conn, patient_id, &fields)?;
    tracing::debug!(id, patient_id, "Diagnostic recorded");
    Ok(Notice::success(
        "Diagnostic record added successfully!",
        format!("/diagnostics/{patient_id}"),
    )
    .with_id(id))
}

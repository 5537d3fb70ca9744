//! Patient endpoints.
//!
//! - `GET /patients`: list, ordered by last then first name
//! - `GET /patients/new`: blank form
//! - `POST /patients`, `POST /patients/new`: create
//! - `GET /patients/:id`: patient-detail bundle
//! - `GET|POST /patients/:id/edit`: load / update
//! - `POST /patients/:id/delete`: delete with history

use axum::extract::{Path, State};
use axum::{Form, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::Notice;
use crate::db;
use crate::models::*;
use crate::state::ClinicState;

#[derive(Serialize)]
pub struct PatientsResponse {
    pub patients: Vec<Patient>,
}

/// `GET /patients`
pub async fn list(State(state): State<ClinicState>) -> Result<Json<PatientsResponse>, ApiError> {
    let conn = state.open_db()?;
    let patients = db::list_patients(&conn)?;
    Ok(Json(PatientsResponse { patients }))
}

/// `GET /patients/new`: empty intake form.
pub async fn new_form() -> Json<PatientFields> {
    Json(PatientFields::default())
}

/// `POST /patients`
pub async fn create(
    State(state): State<ClinicState>,
    Form(fields): Form<PatientFields>,
) -> Result<Notice, ApiError> {
    let conn = state.open_db()?;
    let id = db::insert_patient(&conn, &fields)?;
    tracing::debug!(id, "Patient created");
    Ok(Notice::success("Patient added successfully!", "/patients").with_id(id))
}

/// `GET /patients/:id`
pub async fn detail(
    State(state): State<ClinicState>,
    Path(id): Path<i64>,
) -> Result<Json<PatientBundle>, ApiError> {
    let conn = state.open_db()?;
    let bundle = db::get_patient_bundle(&conn, id)?;
    Ok(Json(bundle))
}

/// `GET /patients/:id/edit`
pub async fn edit_form(
    State(state): State<ClinicState>,
    Path(id): Path<i64>,
) -> Result<Json<Patient>, ApiError> {
    let conn = state.open_db()?;
    Ok(Json(db::require_patient(&conn, id)?))
}

/// `POST /patients/:id/edit`
pub async fn update(
    State(state): State<ClinicState>,
    Path(id): Path<i64>,
    Form(fields): Form<PatientFields>,
) -> Result<Notice, ApiError> {
    let conn = state.open_db()?;
    db::update_patient(&conn, id, &fields)?;
    Ok(Notice::success(
        "Patient updated successfully!",
        format!("/patients/{id}"),
    ))
}

/// `POST /patients/:id/delete`
pub async fn delete(
    State(state): State<ClinicState>,
    Path(id): Path<i64>,
) -> Result<Notice, ApiError> {
    let conn = state.open_db()?;
    db::delete_patient(&conn, id)?;
    tracing::debug!(id, "Patient deleted");
    Ok(Notice::success("Patient deleted successfully!", "/patients"))
}

//! Appointment endpoints.
//!
//! - `GET /appointments`: list with patient names, most recent first
//! - `GET /appointments/new`: form context (patients, statuses)
//! - `POST /appointments`, `POST /appointments/new`: create
//! - `GET /appointments/:id`: single appointment
//! - `GET|POST /appointments/:id/edit`: load / update
//! - `POST /appointments/:id/delete`: delete
//! - `POST /appointments/:id/complete`: mark completed

use axum::extract::{Path, State};
use axum::{Form, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{AppointmentForm, Notice};
use crate::db;
use crate::models::enums::AppointmentStatus;
use crate::models::*;
use crate::state::ClinicState;

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<AppointmentListing>,
}

/// Data an appointment form needs: the record being edited (if any), the
/// patients to choose from and the allowed statuses.
#[derive(Serialize)]
pub struct AppointmentFormContext {
    pub appointment: Option<Appointment>,
    pub patients: Vec<Patient>,
    pub statuses: &'static [AppointmentStatus],
}

/// `GET /appointments`
pub async fn list(
    State(state): State<ClinicState>,
) -> Result<Json<AppointmentsResponse>, ApiError> {
    let conn = state.open_db()?;
    let appointments = db::list_appointments(&conn)?;
    Ok(Json(AppointmentsResponse { appointments }))
}

/// `GET /appointments/new`
pub async fn new_form(
    State(state): State<ClinicState>,
) -> Result<Json<AppointmentFormContext>, ApiError> {
    let conn = state.open_db()?;
    Ok(Json(AppointmentFormContext {
        appointment: None,
        patients: db::list_patients(&conn)?,
        statuses: AppointmentStatus::ALL,
    }))
}

/// `POST /appointments`
pub async fn create(
    State(state): State<ClinicState>,
    Form(form): Form<AppointmentForm>,
) -> Result<Notice, ApiError> {
    let fields = form.into_fields()?;
    let conn = state.open_db()?;
    let id = db::insert_appointment(&conn, &fields)?;
    tracing::debug!(id, patient_id = fields.patient_id, "Appointment created");
    Ok(Notice::success("Appointment scheduled successfully!", "/appointments").with_id(id))
}

/// `GET /appointments/:id`
pub async fn detail(
    State(state): State<ClinicState>,
    Path(id): Path<i64>,
) -> Result<Json<Appointment>, ApiError> {
    let conn = state.open_db()?;
    Ok(Json(db::require_appointment(&conn, id)?))
}

/// `GET /appointments/:id/edit`
pub async fn edit_form(
    State(state): State<ClinicState>,
    Path(id): Path<i64>,
) -> Result<Json<AppointmentFormContext>, ApiError> {
    let conn = state.open_db()?;
    let appointment = db::require_appointment(&conn, id)?;
    Ok(Json(AppointmentFormContext {
        appointment: Some(appointment),
        patients: db::list_patients(&conn)?,
        statuses: AppointmentStatus::ALL,
    }))
}

/// `POST /appointments/:id/edit`
pub async fn update(
    State(state): State<ClinicState>,
    Path(id): Path<i64>,
    Form(form): Form<AppointmentForm>,
) -> Result<Notice, ApiError> {
    let fields = form.into_fields()?;
    let conn = state.open_db()?;
    db::update_appointment(&conn, id, &fields)?;
    Ok(Notice::success("Appointment updated successfully!", "/appointments"))
}

/// `POST /appointments/:id/delete`
pub async fn delete(
    State(state): State<ClinicState>,
    Path(id): Path<i64>,
) -> Result<Notice, ApiError> {
    let conn = state.open_db()?;
    db::delete_appointment(&conn, id)?;
    Ok(Notice::success("Appointment deleted successfully!", "/appointments"))
}

/// `POST /appointments/:id/complete`
pub async fn complete(
    State(state): State<ClinicState>,
    Path(id): Path<i64>,
) -> Result<Notice, ApiError> {
    let conn = state.open_db()?;
    db::complete_appointment(&conn, id)?;
    Ok(Notice::success("Appointment marked as completed!", "/appointments"))
}

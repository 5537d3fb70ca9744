//! Shared request/response types for the HTTP layer.

use std::str::FromStr;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::models::enums::AppointmentStatus;
use crate::models::AppointmentFields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient user-facing message delivered with a `303 See Other`.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    /// Id of the record the action created, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip)]
    pub location: String,
}

impl Notice {
    pub fn success(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            id: None,
            location: location.into(),
        }
    }

    pub fn error(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            id: None,
            location: location.into(),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl IntoResponse for Notice {
    fn into_response(self) -> Response {
        let location = self.location.clone();
        (StatusCode::SEE_OTHER, [(LOCATION, location)], Json(self)).into_response()
    }
}

/// Appointment form as posted. Status arrives as free text and is checked
/// against the known set; blank means "scheduled".
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentForm {
    pub patient_id: i64,
    pub appt_datetime: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl AppointmentForm {
    pub fn into_fields(self) -> Result<AppointmentFields, ApiError> {
        let status = match self.status.as_deref().map(str::trim) {
            None | Some("") => AppointmentStatus::default(),
            Some(s) => AppointmentStatus::from_str(s)?,
        };
        Ok(AppointmentFields {
            patient_id: self.patient_id,
            appt_datetime: self.appt_datetime,
            reason: self.reason,
            status,
        })
    }
}

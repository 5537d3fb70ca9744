//! API error types with structured responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::types::Notice;
use crate::db::DatabaseError;
use crate::report::ReportError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing record: answered with an error notice and a redirect to the
    /// list view the user came from.
    #[error("Not found: {message}")]
    NotFound { message: String, redirect_to: String },
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::NotFound { message, redirect_to } => {
                return Notice::error(message, redirect_to).into_response();
            }
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", detail),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

/// List view to fall back to when an entity lookup fails.
fn list_path(entity_type: &str) -> &'static str {
    match entity_type {
        "Patient" => "/patients",
        "Appointment" => "/appointments",
        _ => "/",
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound { entity_type, .. } => ApiError::NotFound {
                message: format!("{entity_type} not found!"),
                redirect_to: list_path(&entity_type).to_string(),
            },
            DatabaseError::InvalidEnum { .. } => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Database(e) => ApiError::from(e),
            ReportError::Render(detail) => ApiError::Internal(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::header::LOCATION;

    #[tokio::test]
    async fn not_found_redirects_with_notice() {
        let err: ApiError = DatabaseError::NotFound {
            entity_type: "Patient".into(),
            id: "9".into(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/patients");
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["level"], "error");
        assert_eq!(json["message"], "Patient not found!");
    }

    #[tokio::test]
    async fn appointment_not_found_redirects_to_appointments() {
        let err: ApiError = DatabaseError::NotFound {
            entity_type: "Appointment".into(),
            id: "3".into(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/appointments");
    }

    #[tokio::test]
    async fn invalid_enum_returns_400() {
        let err: ApiError = DatabaseError::InvalidEnum {
            field: "AppointmentStatus".into(),
            value: "postponed".into(),
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn internal_returns_500() {
        let response = ApiError::Internal("something broke".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        // Internal errors hide details from client
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn sqlite_error_maps_to_internal() {
        let err: ApiError = DatabaseError::Sqlite(rusqlite::Error::InvalidQuery).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[tokio::test]
    async fn render_error_maps_to_internal() {
        let err: ApiError = ReportError::Render("font".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

//! PDF export endpoint.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use chrono::Local;

use crate::api::error::ApiError;
use crate::report::{assemble_patient_report, DocumentRenderer, PdfRenderer};
use crate::state::ClinicState;

pub fn report_filename(patient_id: i64) -> String {
    format!("patient_{patient_id}_report.pdf")
}

/// `GET /export/patient/:id`: downloadable patient report.
pub async fn patient_report(
    State(state): State<ClinicState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let document = {
        let conn = state.open_db()?;
        assemble_patient_report(&conn, id, Local::now().naive_local())?
    };

    let bytes = PdfRenderer::default().render(&document)?;
    tracing::info!(patient_id = id, bytes = bytes.len(), "Patient report exported");

    let disposition = format!("attachment; filename=\"{}\"", report_filename(id));
    Ok((
        [
            (CONTENT_TYPE, "application/pdf".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::*;

use super::patient::require_patient;

/// Records a diagnostic note for an existing patient and returns its id.
/// Fails with `NotFound` without writing anything if the patient is missing.
pub fn insert_diagnostic(
    conn: &Connection,
    patient_id: i64,
    fields: &DiagnosticFields,
) -> Result<i64, DatabaseError> {
    require_patient(conn, patient_id)?;
    conn.execute(
        "INSERT INTO diagnostics (patient_id, diag_datetime, notes)
         VALUES (?1, ?2, ?3)",
        params![patient_id, fields.diag_datetime, fields.notes],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_diagnostic(conn: &Connection, id: i64) -> Result<Option<Diagnostic>, DatabaseError> {
    let diagnostic = conn
        .query_row(
            "SELECT id, patient_id, diag_datetime, notes FROM diagnostics WHERE id = ?1",
            params![id],
            diagnostic_from_row,
        )
        .optional()?;
    Ok(diagnostic)
}

/// A patient's diagnostics, most recent first.
pub fn list_diagnostics_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<Diagnostic>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, diag_datetime, notes
         FROM diagnostics WHERE patient_id = ?1
         ORDER BY diag_datetime DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![patient_id], diagnostic_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn diagnostic_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Diagnostic> {
    Ok(Diagnostic {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        diag_datetime: row.get(2)?,
        notes: row.get(3)?,
    })
}

use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::*;

use super::appointment::list_appointments_for_patient;
use super::diagnostic::list_diagnostics_for_patient;

const PATIENT_COLUMNS: &str = "id, first_name, last_name, dob, gender, contact";

pub fn insert_patient(conn: &Connection, fields: &PatientFields) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (first_name, last_name, dob, gender, contact)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            fields.first_name,
            fields.last_name,
            fields.dob,
            fields.gender,
            fields.contact,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1"),
            params![id],
            patient_from_row,
        )
        .optional()?;
    Ok(patient)
}

/// Like [`get_patient`], but a missing row is an error.
pub fn require_patient(conn: &Connection, id: i64) -> Result<Patient, DatabaseError> {
    get_patient(conn, id)?.ok_or_else(|| DatabaseError::not_found("Patient", id))
}

/// All patients ordered by last name, then first name.
pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY last_name, first_name, id"
    ))?;
    let rows = stmt.query_map([], patient_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_patient(
    conn: &Connection,
    id: i64,
    fields: &PatientFields,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients
         SET first_name = ?1, last_name = ?2, dob = ?3, gender = ?4, contact = ?5
         WHERE id = ?6",
        params![
            fields.first_name,
            fields.last_name,
            fields.dob,
            fields.gender,
            fields.contact,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::not_found("Patient", id));
    }
    Ok(())
}

/// Deletes a patient. Appointments and diagnostics go with it
/// (`ON DELETE CASCADE`).
pub fn delete_patient(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::not_found("Patient", id));
    }
    Ok(())
}

/// Patient record plus full appointment and diagnostic history.
pub fn get_patient_bundle(conn: &Connection, id: i64) -> Result<PatientBundle, DatabaseError> {
    let patient = require_patient(conn, id)?;
    let appointments = list_appointments_for_patient(conn, id)?;
    let diagnostics = list_diagnostics_for_patient(conn, id)?;
    Ok(PatientBundle {
        patient,
        appointments,
        diagnostics,
    })
}

fn patient_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        dob: row.get(3)?,
        gender: row.get(4)?,
        contact: row.get(5)?,
    })
}

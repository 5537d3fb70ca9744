use std::str::FromStr;

use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

use super::patient::require_patient;

/// Creates an appointment for an existing patient and returns its id.
pub fn insert_appointment(
    conn: &Connection,
    fields: &AppointmentFields,
) -> Result<i64, DatabaseError> {
    require_patient(conn, fields.patient_id)?;
    conn.execute(
        "INSERT INTO appointments (patient_id, appt_datetime, reason, status)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            fields.patient_id,
            fields.appt_datetime,
            fields.reason,
            fields.status.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Option<Appointment>, DatabaseError> {
    let row = conn
        .query_row(
            "SELECT id, patient_id, appt_datetime, reason, status
             FROM appointments WHERE id = ?1",
            params![id],
            appointment_row,
        )
        .optional()?;
    row.map(appointment_from_row).transpose()
}

pub fn require_appointment(conn: &Connection, id: i64) -> Result<Appointment, DatabaseError> {
    get_appointment(conn, id)?.ok_or_else(|| DatabaseError::not_found("Appointment", id))
}

/// Lists all appointments with the patient's name, most recent first.
pub fn list_appointments(conn: &Connection) -> Result<Vec<AppointmentListing>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.patient_id, a.appt_datetime, a.reason, a.status,
                p.first_name, p.last_name
         FROM appointments a
         JOIN patients p ON a.patient_id = p.id
         ORDER BY a.appt_datetime DESC, a.id DESC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            appointment_row(row)?,
            row.get::<_, String>(5)?,
            row.get::<_, String>(6)?,
        ))
    })?;

    let mut listings = Vec::new();
    for row in rows {
        let (raw, first_name, last_name) = row?;
        listings.push(AppointmentListing {
            appointment: appointment_from_row(raw)?,
            first_name,
            last_name,
        });
    }
    Ok(listings)
}

/// A patient's appointments, most recent first.
pub fn list_appointments_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<Appointment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, appt_datetime, reason, status
         FROM appointments WHERE patient_id = ?1
         ORDER BY appt_datetime DESC, id DESC",
    )?;
    let rows = stmt.query_map(params![patient_id], appointment_row)?;

    let mut appointments = Vec::new();
    for row in rows {
        appointments.push(appointment_from_row(row?)?);
    }
    Ok(appointments)
}

pub fn update_appointment(
    conn: &Connection,
    id: i64,
    fields: &AppointmentFields,
) -> Result<(), DatabaseError> {
    require_appointment(conn, id)?;
    require_patient(conn, fields.patient_id)?;
    conn.execute(
        "UPDATE appointments
         SET patient_id = ?1, appt_datetime = ?2, reason = ?3, status = ?4
         WHERE id = ?5",
        params![
            fields.patient_id,
            fields.appt_datetime,
            fields.reason,
            fields.status.as_str(),
            id,
        ],
    )?;
    Ok(())
}

/// Marks an appointment as completed.
pub fn complete_appointment(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET status = ?1 WHERE id = ?2",
        params![AppointmentStatus::Completed.as_str(), id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::not_found("Appointment", id));
    }
    Ok(())
}

pub fn delete_appointment(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::not_found("Appointment", id));
    }
    Ok(())
}

type AppointmentRow = (i64, i64, String, String, String);

fn appointment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
    ))
}

fn appointment_from_row(row: AppointmentRow) -> Result<Appointment, DatabaseError> {
    let (id, patient_id, appt_datetime, reason, status) = row;
    Ok(Appointment {
        id,
        patient_id,
        appt_datetime,
        reason,
        status: AppointmentStatus::from_str(&status)?,
    })
}

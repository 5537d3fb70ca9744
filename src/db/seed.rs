//! Demo dataset, inserted only into an empty store.

use rusqlite::Connection;

use crate::db::repository::*;
use crate::db::DatabaseError;
use crate::models::enums::AppointmentStatus;
use crate::models::*;

const DEMO_PATIENTS: &[(&str, &str, &str, &str, &str)] = &[
    ("John", "Doe", "1980-05-15", "Male", "555-0101"),
    ("Jane", "Smith", "1992-08-22", "Female", "555-0102"),
    ("Robert", "Johnson", "1975-12-10", "Male", "555-0103"),
    ("Emily", "Davis", "1988-03-25", "Female", "555-0104"),
    ("Michael", "Brown", "1995-07-08", "Male", "555-0105"),
];

/// (patient index, datetime, reason, status)
const DEMO_APPOINTMENTS: &[(usize, &str, &str, AppointmentStatus)] = &[
    (0, "2024-12-15 10:00", "Regular checkup", AppointmentStatus::Scheduled),
    (1, "2024-12-10 14:30", "Follow-up appointment", AppointmentStatus::Completed),
    (2, "2024-12-20 09:00", "Consultation", AppointmentStatus::Scheduled),
];

/// (patient index, datetime, notes)
const DEMO_DIAGNOSTICS: &[(usize, &str, &str)] = &[
    (
        0,
        "2024-11-01 10:00",
        "Blood pressure: 120/80. Heart rate: 72 bpm. All vitals normal.",
    ),
    (
        1,
        "2024-11-05 14:00",
        "Blood test results: Hemoglobin 14.2 g/dL, Glucose 95 mg/dL. All values within normal range.",
    ),
    (
        0,
        "2024-11-10 11:00",
        "X-Ray examination: No abnormalities detected. Chest clear.",
    ),
];

/// Inserts the demo dataset in one transaction if there are no patients yet.
/// Returns whether anything was inserted.
pub fn seed_demo_data(conn: &mut Connection) -> Result<bool, DatabaseError> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    if existing > 0 {
        tracing::debug!(existing, "Store not empty, skipping demo seed");
        return Ok(false);
    }

    let tx = conn.transaction()?;

    let mut patient_ids = Vec::with_capacity(DEMO_PATIENTS.len());
    for &(first, last, dob, gender, contact) in DEMO_PATIENTS {
        let id = insert_patient(
            &tx,
            &PatientFields {
                first_name: first.into(),
                last_name: last.into(),
                dob: dob.into(),
                gender: gender.into(),
                contact: contact.into(),
            },
        )?;
        patient_ids.push(id);
    }

    for &(idx, when, reason, status) in DEMO_APPOINTMENTS {
        insert_appointment(
            &tx,
            &AppointmentFields {
                patient_id: patient_ids[idx],
                appt_datetime: when.into(),
                reason: reason.into(),
                status,
            },
        )?;
    }

    for &(idx, when, notes) in DEMO_DIAGNOSTICS {
        insert_diagnostic(
            &tx,
            patient_ids[idx],
            &DiagnosticFields {
                diag_datetime: when.into(),
                notes: notes.into(),
            },
        )?;
    }

    tx.commit()?;
    tracing::info!(
        patients = DEMO_PATIENTS.len(),
        appointments = DEMO_APPOINTMENTS.len(),
        diagnostics = DEMO_DIAGNOSTICS.len(),
        "Demo data seeded"
    );
    Ok(true)
}

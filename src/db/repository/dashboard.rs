use rusqlite::Connection;

use crate::db::DatabaseError;
use crate::models::*;

/// Totals and breakdowns for the dashboard. An empty store yields zeros and
/// empty groupings.
pub fn dashboard_summary(conn: &Connection) -> Result<DashboardSummary, DatabaseError> {
    Ok(DashboardSummary {
        total_patients: count_rows(conn, "SELECT COUNT(*) FROM patients")?,
        total_appointments: count_rows(conn, "SELECT COUNT(*) FROM appointments")?,
        total_diagnostics: count_rows(conn, "SELECT COUNT(*) FROM diagnostics")?,
        appointments_by_status: appointment_status_counts(conn)?,
        patients_by_gender: patient_gender_counts(conn)?,
    })
}

pub fn appointment_status_counts(conn: &Connection) -> Result<Vec<CategoryCount>, DatabaseError> {
    grouped_counts(
        conn,
        "SELECT status, COUNT(*) FROM appointments GROUP BY status ORDER BY status",
    )
}

/// Patients per recorded gender. Blank genders are not a group.
pub fn patient_gender_counts(conn: &Connection) -> Result<Vec<CategoryCount>, DatabaseError> {
    grouped_counts(
        conn,
        "SELECT gender, COUNT(*) FROM patients
         WHERE gender IS NOT NULL AND gender != ''
         GROUP BY gender ORDER BY gender",
    )
}

fn count_rows(conn: &Connection, sql: &str) -> Result<i64, DatabaseError> {
    Ok(conn.query_row(sql, [], |row| row.get::<_, i64>(0))?)
}

fn grouped_counts(conn: &Connection, sql: &str) -> Result<Vec<CategoryCount>, DatabaseError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(CategoryCount {
            label: row.get(0)?,
            count: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}

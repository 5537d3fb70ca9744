use serde::{Deserialize, Serialize};

use super::{Appointment, Diagnostic, Patient};

/// Row count for one value of a grouped column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_patients: i64,
    pub total_appointments: i64,
    pub total_diagnostics: i64,
    pub appointments_by_status: Vec<CategoryCount>,
    pub patients_by_gender: Vec<CategoryCount>,
}

/// A patient together with their full appointment and diagnostic history,
/// each most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientBundle {
    pub patient: Patient,
    pub appointments: Vec<Appointment>,
    pub diagnostics: Vec<Diagnostic>,
}

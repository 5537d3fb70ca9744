use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub id: i64,
    pub patient_id: i64,
    pub diag_datetime: String,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticFields {
    pub diag_datetime: String,
    #[serde(default)]
    pub notes: String,
}

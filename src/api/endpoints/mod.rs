//! API endpoint handlers.
//!
//! Each handler opens its own connection from `ClinicState`, calls into the
//! repository layer and drops the connection before responding.

pub mod appointments;
pub mod dashboard;
pub mod diagnostics;
pub mod export;
pub mod health;
pub mod patients;

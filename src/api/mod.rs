//! HTTP API.
//!
//! Routes mirror the clinic's screens: dashboard, patients, appointments,
//! diagnostics and PDF export. Form posts answer with `303 See Other` and a
//! JSON notice; reads answer with JSON.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::clinic_router;
pub use server::{start_server_on, ClinicServer};

//! Repository layer: entity-scoped database operations.
//!
//! Every function takes a borrowed `Connection`; callers own the connection
//! lifetime (one per request in the HTTP layer).

mod appointment;
mod dashboard;
mod diagnostic;
mod patient;

pub use appointment::*;
pub use dashboard::*;
pub use diagnostic::*;
pub use patient::*;

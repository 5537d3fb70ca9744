pub mod appointment;
pub mod dashboard;
pub mod diagnostic;
pub mod enums;
pub mod patient;

pub use appointment::*;
pub use dashboard::*;
pub use diagnostic::*;
pub use patient::*;

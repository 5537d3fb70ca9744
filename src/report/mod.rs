//! Patient report export.
//!
//! [`document`] assembles a patient's record into an ordered, style-annotated
//! [`ReportDocument`]; [`pdf`] renders that model through `printpdf`. The two
//! halves meet only at the [`DocumentRenderer`] trait.

pub mod document;
pub mod pdf;

pub use document::*;
pub use pdf::PdfRenderer;

use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Report rendering failed: {0}")]
    Render(String),
}

/// Turns a report document model into an opaque byte stream.
pub trait DocumentRenderer {
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError>;
}

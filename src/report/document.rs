use chrono::NaiveDateTime;
use rusqlite::Connection;

use crate::db::{get_patient_bundle, DatabaseError};
use crate::models::*;

pub const REPORT_TITLE: &str = "Patient Medical Report";
pub const NO_APPOINTMENTS: &str = "No appointments recorded.";
pub const NO_DIAGNOSTICS: &str = "No diagnostics recorded.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
}

impl TextStyle {
    pub const PLAIN: TextStyle = TextStyle { bold: false, italic: false };
    pub const BOLD: TextStyle = TextStyle { bold: true, italic: false };
    pub const ITALIC: TextStyle = TextStyle { bold: false, italic: true };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Section title. Level 1 is the document title.
    Heading { level: u8, text: String },
    /// Single line of text.
    Line { text: String, style: TextStyle },
    /// Free text, wrapped to the page width by the renderer.
    Paragraph { text: String, style: TextStyle },
    /// Vertical gap in millimetres.
    Spacer { mm: u8 },
}

impl Block {
    fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading { level, text: text.into() }
    }

    fn line(text: impl Into<String>) -> Self {
        Block::Line { text: text.into(), style: TextStyle::PLAIN }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } | Block::Line { text, .. } | Block::Paragraph { text, .. } => {
                Some(text)
            }
            Block::Spacer { .. } => None,
        }
    }
}

/// Ordered blocks handed to a [`super::DocumentRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl ReportDocument {
    /// All text lines in order, one per block.
    pub fn lines(&self) -> Vec<&str> {
        self.blocks.iter().filter_map(Block::text).collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.blocks
            .iter()
            .filter_map(Block::text)
            .any(|text| text.contains(needle))
    }
}

/// Loads the patient's record and builds the report. Fails with `NotFound`
/// before building anything if the patient does not exist.
pub fn assemble_patient_report(
    conn: &Connection,
    patient_id: i64,
    generated_at: NaiveDateTime,
) -> Result<ReportDocument, DatabaseError> {
    let bundle = get_patient_bundle(conn, patient_id)?;
    Ok(build_patient_report(&bundle, generated_at))
}

pub fn build_patient_report(bundle: &PatientBundle, generated_at: NaiveDateTime) -> ReportDocument {
    let mut blocks = vec![
        Block::heading(1, REPORT_TITLE),
        Block::Line {
            text: format!("Generated on {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
            style: TextStyle::ITALIC,
        },
        Block::Spacer { mm: 8 },
    ];

    push_patient_section(&mut blocks, &bundle.patient);
    push_appointments_section(&mut blocks, &bundle.appointments);
    push_diagnostics_section(&mut blocks, &bundle.diagnostics);

    ReportDocument {
        title: format!("{REPORT_TITLE} - {}", bundle.patient.full_name()),
        blocks,
    }
}

fn push_patient_section(blocks: &mut Vec<Block>, patient: &Patient) {
    blocks.push(Block::heading(2, "Patient Information"));
    blocks.push(Block::line(format!("Name: {}", patient.full_name())));

    let optional = [
        ("Date of Birth", &patient.dob),
        ("Gender", &patient.gender),
        ("Contact", &patient.contact),
    ];
    for (label, value) in optional {
        if !value.is_empty() {
            blocks.push(Block::line(format!("{label}: {value}")));
        }
    }
    blocks.push(Block::Spacer { mm: 5 });
}

fn push_appointments_section(blocks: &mut Vec<Block>, appointments: &[Appointment]) {
    blocks.push(Block::heading(2, "Appointments"));
    if appointments.is_empty() {
        blocks.push(Block::line(NO_APPOINTMENTS));
    }
    for appt in appointments {
        blocks.push(Block::line(format!(
            "Date: {} | Status: {}",
            appt.appt_datetime, appt.status
        )));
        if !appt.reason.is_empty() {
            blocks.push(Block::line(format!("Reason: {}", appt.reason)));
        }
        blocks.push(Block::Spacer { mm: 2 });
    }
    blocks.push(Block::Spacer { mm: 5 });
}

fn push_diagnostics_section(blocks: &mut Vec<Block>, diagnostics: &[Diagnostic]) {
    blocks.push(Block::heading(2, "Diagnostics"));
    if diagnostics.is_empty() {
        blocks.push(Block::line(NO_DIAGNOSTICS));
    }
    for diag in diagnostics {
        blocks.push(Block::line(format!("Date: {}", diag.diag_datetime)));
        if !diag.notes.is_empty() {
            blocks.push(Block::Paragraph {
                text: format!("Notes: {}", diag.notes),
                style: TextStyle::PLAIN,
            });
        }
        blocks.push(Block::Spacer { mm: 2 });
    }
}

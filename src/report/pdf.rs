//! PDF rendering of a [`ReportDocument`] via `printpdf`.
//!
//! Rendering is two passes: [`PdfRenderer::layout`] places every line on a
//! page (word wrap + automatic page breaks), then `render` writes the placed
//! lines with the built-in Helvetica family.

use std::io::BufWriter;

use printpdf::*;

use super::document::{Block, ReportDocument, TextStyle};
use super::{DocumentRenderer, ReportError};

const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const HEADING_LINE_MM: f32 = 10.0;
const BODY_LINE_MM: f32 = 6.0;

/// A4 portrait with 15 mm top/bottom margins by default.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_top_mm: f32,
    pub margin_bottom_mm: f32,
    /// Characters per wrapped paragraph line.
    pub wrap_chars: usize,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_left_mm: 20.0,
            margin_top_mm: 15.0,
            margin_bottom_mm: 15.0,
            wrap_chars: 95,
        }
    }
}

/// One line of text at its final position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub page: usize,
    pub y_mm: f32,
    pub size: f32,
    pub style: TextStyle,
    pub text: String,
}

impl PdfRenderer {
    /// Positions every text line of the document, breaking pages when the
    /// next line would cross the bottom margin.
    pub fn layout(&self, document: &ReportDocument) -> Vec<PlacedText> {
        let mut cursor = Cursor::new(self);

        for block in &document.blocks {
            match block {
                Block::Heading { level, text } => {
                    let size = if *level <= 1 { TITLE_SIZE } else { HEADING_SIZE };
                    cursor.place(text.clone(), size, HEADING_LINE_MM, TextStyle::BOLD);
                }
                Block::Line { text, style } => {
                    cursor.place(text.clone(), BODY_SIZE, BODY_LINE_MM, *style);
                }
                Block::Paragraph { text, style } => {
                    for line in wrap_text(text, self.wrap_chars) {
                        cursor.place(line, BODY_SIZE, BODY_LINE_MM, *style);
                    }
                }
                // Gaps never break a page on their own; the next line does.
                Block::Spacer { mm } => cursor.y -= f32::from(*mm),
            }
        }

        cursor.placed
    }

    fn top_mm(&self) -> f32 {
        self.page_height_mm - self.margin_top_mm
    }
}

struct Cursor<'a> {
    renderer: &'a PdfRenderer,
    page: usize,
    y: f32,
    placed: Vec<PlacedText>,
}

impl<'a> Cursor<'a> {
    fn new(renderer: &'a PdfRenderer) -> Self {
        Self {
            renderer,
            page: 0,
            y: renderer.top_mm(),
            placed: Vec::new(),
        }
    }

    fn place(&mut self, text: String, size: f32, line_mm: f32, style: TextStyle) {
        let top = self.renderer.top_mm();
        if self.y - line_mm < self.renderer.margin_bottom_mm && self.y < top {
            self.page += 1;
            self.y = top;
        }
        self.placed.push(PlacedText {
            page: self.page,
            y_mm: self.y,
            size,
            style,
            text,
        });
        self.y -= line_mm;
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let placed = self.layout(document);
        let page_count = placed.last().map(|p| p.page + 1).unwrap_or(1);

        let (doc, page1, layer1) = PdfDocument::new(
            &document.title,
            Mm(self.page_width_mm),
            Mm(self.page_height_mm),
            "Layer 1",
        );

        let mut layers = vec![doc.get_page(page1).get_layer(layer1)];
        for n in 1..page_count {
            let (page, layer) = doc.add_page(
                Mm(self.page_width_mm),
                Mm(self.page_height_mm),
                format!("Layer {}", n + 1),
            );
            layers.push(doc.get_page(page).get_layer(layer));
        }

        let fonts = Fonts::load(&doc)?;
        for text in &placed {
            layers[text.page].use_text(
                &text.text,
                text.size,
                Mm(self.margin_left_mm),
                Mm(text.y_mm),
                fonts.for_style(text.style),
            );
        }

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| ReportError::Render(format!("PDF save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| ReportError::Render(format!("PDF buffer error: {e}")))
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, ReportError> {
        let add = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))
        };
        Ok(Self {
            regular: add(BuiltinFont::Helvetica)?,
            bold: add(BuiltinFont::HelveticaBold)?,
            italic: add(BuiltinFont::HelveticaOblique)?,
            bold_italic: add(BuiltinFont::HelveticaBoldOblique)?,
        })
    }

    fn for_style(&self, style: TextStyle) -> &IndirectFontRef {
        match (style.bold, style.italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }
}

/// Greedy word wrap measured in characters. A word wider than a whole line
/// is cut into `max_chars` pieces so nothing runs past the right margin.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut width = 0;

    for word in text.split_whitespace().flat_map(|w| split_long_word(w, max_chars)) {
        let word_width = word.chars().count();
        if width > 0 && width + 1 + word_width > max_chars {
            lines.push(std::mem::take(&mut current));
            width = 0;
        }
        if width > 0 {
            current.push(' ');
            width += 1;
        }
        current.push_str(word);
        width += word_width;
    }

    if width > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Cuts `word` into pieces of at most `max_chars` characters, on char
/// boundaries.
fn split_long_word(word: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = word;
    while let Some((cut, _)) = rest.char_indices().nth(max_chars) {
        let (head, tail) = rest.split_at(cut);
        pieces.push(head);
        rest = tail;
    }
    pieces.push(rest);
    pieces
}

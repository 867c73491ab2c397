//! Text run extraction from PDF content streams.
//!
//! Each text-showing operator produces one fragment carrying the current
//! font and effective size. Fragments are trimmed, optionally merged with
//! their neighbours on the same baseline, and emitted as [`TextRun`]s in
//! content-stream order, page by page.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{size_key, TextRun};

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};
use super::options::{ErrorMode, ExtractOptions};

/// TJ adjustments beyond this many thousandths of an em read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Average glyph width as a fraction of the font size, used to estimate
/// how far a fragment advances without font metrics.
const AVG_CHAR_WIDTH: f32 = 0.5;

/// Extracts ordered [`TextRun`]s from a document.
#[derive(Debug, Clone, Default)]
pub struct RunExtractor {
    options: ExtractOptions,
}

impl RunExtractor {
    /// Create an extractor with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// The options this extractor was built with.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract runs from every selected page, in page order.
    pub fn extract<B: PdfBackend + ?Sized>(&self, backend: &B) -> Result<Vec<TextRun>> {
        let pages = backend.pages();
        let total = pages.len() as u32;

        if let Some(last) = self.options.pages.last_page() {
            if last > total {
                match self.options.error_mode {
                    ErrorMode::Strict => return Err(Error::PageOutOfRange(last, total)),
                    ErrorMode::Lenient => {
                        log::warn!("page {} requested but document has {} pages", last, total)
                    }
                }
            }
        }

        let mut runs = Vec::new();
        for (page_num, page_id) in pages {
            if !self.options.pages.includes(page_num) {
                continue;
            }

            match self.extract_page(backend, page_num, page_id) {
                Ok(page_runs) => {
                    log::debug!("page {}: {} runs", page_num, page_runs.len());
                    runs.extend(page_runs);
                }
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(runs)
    }

    /// Extract runs from a single page.
    pub fn extract_page<B: PdfBackend + ?Sized>(
        &self,
        backend: &B,
        page_num: u32,
        page_id: PageId,
    ) -> Result<Vec<TextRun>> {
        let fonts: HashMap<Vec<u8>, String> = backend
            .page_fonts(page_id)?
            .into_iter()
            .map(|f| (f.name, f.base_font))
            .collect();

        let content = backend.page_content(page_id)?;
        let ops = backend
            .decode_content(&content)
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_num, e)))?;

        let mut interpreter = PageInterpreter {
            backend,
            page_id,
            page_num,
            fonts: &fonts,
            options: &self.options,
            state: TextState::default(),
            pending: None,
            runs: Vec::new(),
        };
        for op in &ops {
            interpreter.apply(op);
        }
        interpreter.flush();

        Ok(interpreter.runs)
    }
}

/// Text line matrix `[a b c d e f]` plus the horizontal advance made by
/// text shown since it was last set.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    advance: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            advance: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        *self = Self {
            a,
            b,
            c,
            d,
            e,
            f,
            advance: 0.0,
        };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
        self.advance = 0.0;
    }

    fn position(&self) -> (f32, f32) {
        (self.e + self.advance * self.a, self.f + self.advance * self.b)
    }

    /// Vertical scale factor applied to glyphs.
    fn scale(&self) -> f32 {
        (self.b * self.b + self.d * self.d).sqrt()
    }
}

/// Graphics-independent text state tracked across operators.
#[derive(Debug, Clone)]
struct TextState {
    font_resource: Vec<u8>,
    font_size: f32,
    leading: f32,
    matrix: TextMatrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font_resource: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
            matrix: TextMatrix::default(),
        }
    }
}

/// A fragment waiting to be merged with the next one or emitted.
#[derive(Debug)]
struct PendingRun {
    text: String,
    font: String,
    size: f32,
    y: f32,
    end_x: f32,
}

struct PageInterpreter<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
    page_id: PageId,
    page_num: u32,
    fonts: &'a HashMap<Vec<u8>, String>,
    options: &'a ExtractOptions,
    state: TextState,
    pending: Option<PendingRun>,
    runs: Vec<TextRun>,
}

impl<B: PdfBackend + ?Sized> PageInterpreter<'_, B> {
    fn apply(&mut self, op: &ContentOp) {
        match op.operator.as_str() {
            "BT" => self.state.matrix = TextMatrix::default(),
            "ET" => self.flush(),
            "Tf" => {
                if let Some(PdfValue::Name(name)) = op.operands.first() {
                    self.state.font_resource = name.clone();
                }
                self.state.font_size = op.number(1, self.state.font_size);
            }
            "TL" => self.state.leading = op.number(0, 0.0),
            "Td" => self
                .state
                .matrix
                .translate(op.number(0, 0.0), op.number(1, 0.0)),
            "TD" => {
                let ty = op.number(1, 0.0);
                self.state.leading = -ty;
                self.state.matrix.translate(op.number(0, 0.0), ty);
            }
            "Tm" => self.state.matrix.set(
                op.number(0, 1.0),
                op.number(1, 0.0),
                op.number(2, 0.0),
                op.number(3, 1.0),
                op.number(4, 0.0),
                op.number(5, 0.0),
            ),
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                    let text = self.decode(bytes);
                    self.show(text, 0.0);
                }
            }
            "TJ" => {
                if let Some(PdfValue::Array(items)) = op.operands.first() {
                    self.show_array(items);
                }
            }
            "'" | "\"" => {
                self.next_line();
                let index = if op.operator == "\"" { 2 } else { 0 };
                if let Some(PdfValue::Str(bytes)) = op.operands.get(index) {
                    let text = self.decode(bytes);
                    self.show(text, 0.0);
                }
            }
            _ => {}
        }
    }

    fn next_line(&mut self) {
        let leading = if self.state.leading != 0.0 {
            self.state.leading
        } else {
            self.state.font_size
        };
        self.state.matrix.translate(0.0, -leading);
    }

    fn decode(&self, bytes: &[u8]) -> String {
        self.backend
            .decode_text(self.page_id, &self.state.font_resource, bytes)
    }

    fn show_array(&mut self, items: &[PdfValue]) {
        let mut combined = String::new();
        // Kerning moves in thousandths of an em; tracked for the advance estimate.
        let mut kerning = 0.0;

        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(bytes)),
                other => {
                    if let Some(n) = other.as_number() {
                        kerning -= n;
                        if -n > TJ_SPACE_THRESHOLD
                            && !combined.is_empty()
                            && !combined.ends_with(char::is_whitespace)
                        {
                            combined.push(' ');
                        }
                    }
                }
            }
        }

        self.show(combined, kerning / 1000.0);
    }

    /// Record a fragment at the current position. `extra_advance` is in ems.
    fn show(&mut self, text: String, extra_advance: f32) {
        let (x, y) = self.state.matrix.position();
        let size = self.state.font_size * self.state.matrix.scale();
        let advance_ems = text.chars().count() as f32 * AVG_CHAR_WIDTH + extra_advance;
        self.state.matrix.advance += advance_ems * self.state.font_size;

        if text.trim().is_empty() {
            return;
        }

        let font = self
            .fonts
            .get(&self.state.font_resource)
            .cloned()
            .unwrap_or_else(|| String::from_utf8_lossy(&self.state.font_resource).to_string());
        let end_x = x + advance_ems * size;

        if self.options.merge_spans {
            if let Some(pending) = self.pending.as_mut() {
                let same_style = pending.font == font && size_key(pending.size) == size_key(size);
                let same_line = (pending.y - y).abs() < size * 0.2;
                let moves_forward = x >= pending.end_x - size * AVG_CHAR_WIDTH;

                if same_style && same_line && moves_forward {
                    let gap = x - pending.end_x;
                    if gap > size * 0.15
                        && !pending.text.ends_with(char::is_whitespace)
                        && !text.starts_with(char::is_whitespace)
                    {
                        pending.text.push(' ');
                    }
                    pending.text.push_str(&text);
                    pending.end_x = end_x;
                    return;
                }
            }
        }

        self.flush();
        self.pending = Some(PendingRun {
            text,
            font,
            size,
            y,
            end_x,
        });
    }

    /// Emit the pending fragment as a run.
    fn flush(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let trimmed = pending.text.trim();
        let text = if self.options.normalize_unicode {
            trimmed.nfc().collect::<String>()
        } else {
            trimmed.to_string()
        };

        if !text.is_empty() {
            self.runs
                .push(TextRun::new(text, pending.font, pending.size, self.page_num));
        }
    }
}

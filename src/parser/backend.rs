//! PDF backend abstraction layer.
//!
//! The run extractor talks to PDFs through the [`PdfBackend`] trait so that
//! it never touches lopdf types directly and can be driven by a mock in
//! tests. [`LopdfBackend`] is the concrete implementation.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, Object};

use crate::detect::{sniff_bytes, sniff_path};
use crate::error::{Error, Result};
use crate::model::{parse_pdf_date, DocumentInfo};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Font information returned by the backend.
#[derive(Debug, Clone)]
pub struct BackendFontInfo {
    /// Font resource name (key in the page's font dictionary, e.g. "F1").
    pub name: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold").
    pub base_font: String,
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// The value as a number, if it is one.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Create an operation.
    pub fn new(operator: impl Into<String>, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    /// Numeric operand at `index`, or `default` if missing or not a number.
    pub fn number(&self, index: usize, default: f32) -> f32 {
        self.operands
            .get(index)
            .and_then(PdfValue::as_number)
            .unwrap_or(default)
    }
}

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId), ascending.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Return font info for a given page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>>;

    /// Return the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Decode a text byte sequence using the font's encoding on the given page.
    /// Falls back to simple decoding if the font or encoding is unavailable.
    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String;
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let [0xFE, 0xFF, rest @ ..] = bytes {
        let utf16: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        // Latin-1
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        sniff_path(path)?;
        let doc = LopdfDocument::load(path)?;
        Ok(Self::checked(doc))
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self::checked(doc))
    }

    /// Load from a reader.
    pub fn load_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    fn checked(doc: LopdfDocument) -> Self {
        if doc.is_encrypted() {
            log::warn!("document is encrypted; extracted text may be unreadable");
        }
        Self { doc }
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Read version, page count and the trailer `Info` dictionary.
    pub fn info(&self) -> DocumentInfo {
        let mut info = DocumentInfo::with_version(self.version());
        info.page_count = self.page_count();
        info.encrypted = self.is_encrypted();

        let dict = match self.doc.trailer.get(b"Info") {
            Ok(Object::Reference(id)) => self.doc.get_dictionary(*id).ok(),
            Ok(Object::Dictionary(dict)) => Some(dict),
            _ => None,
        };

        if let Some(dict) = dict {
            let text = |key: &[u8]| match dict.get(key) {
                Ok(Object::String(bytes, _)) => Some(decode_text_simple(bytes)),
                Ok(Object::Name(bytes)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            };
            info.title = text(b"Title");
            info.author = text(b"Author");
            info.creator = text(b"Creator");
            info.producer = text(b"Producer");
            info.created = text(b"CreationDate").and_then(|d| parse_pdf_date(&d));
            info.modified = text(b"ModDate").and_then(|d| parse_pdf_date(&d));
        }

        info
    }

    fn stream_content(&self, obj: &Object) -> Result<Vec<u8>> {
        let obj = match obj {
            Object::Reference(r) => self.doc.get_object(*r)?,
            other => other,
        };
        match obj {
            Object::Stream(s) if s.dict.get(b"Filter").is_ok() => s
                .decompressed_content()
                .map_err(|e| Error::PdfParse(e.to_string())),
            Object::Stream(s) => Ok(s.content.clone()),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>> {
        let fonts = self.doc.get_page_fonts(page)?;

        Ok(fonts
            .iter()
            .map(|(name, font_dict)| BackendFontInfo {
                name: name.clone(),
                base_font: font_dict
                    .get(b"BaseFont")
                    .ok()
                    .and_then(|o| o.as_name().ok())
                    .map(|n| String::from_utf8_lossy(n).to_string())
                    .unwrap_or_else(|| String::from_utf8_lossy(name).to_string()),
            })
            .collect())
    }

    fn page_content(&self, page: PageId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page)?;

        // A page without Contents is blank.
        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };

        let parts = match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Array(arr) => arr.clone(),
                _ => vec![contents.clone()],
            },
            Object::Array(arr) => arr.clone(),
            other => vec![other.clone()],
        };

        let mut content = Vec::new();
        for part in &parts {
            content.extend_from_slice(&self.stream_content(part)?);
            content.push(b'\n');
        }
        Ok(content)
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content =
            lopdf::content::Content::decode(data).map_err(|e| Error::PdfParse(e.to_string()))?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn decode_text(&self, page: PageId, font_name: &[u8], bytes: &[u8]) -> String {
        if let Ok(fonts) = self.doc.get_page_fonts(page) {
            if let Some(font_dict) = fonts.get(font_name) {
                if let Ok(enc) = font_dict.get_font_encoding(&self.doc) {
                    if let Ok(text) = LopdfDocument::decode_text(&enc, bytes) {
                        return text;
                    }
                }
            }
        }
        decode_text_simple(bytes)
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}

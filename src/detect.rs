//! PDF header sniffing.
//!
//! Inputs are checked for a `%PDF-x.y` header before they reach the PDF
//! loader, so that non-PDF files fail fast with [`Error::UnknownFormat`]
//! instead of a parser error from deep inside lopdf.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Header information read from the first bytes of a PDF file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const HEADER_LEN: usize = PDF_MAGIC.len() + 3;

/// Read the header of a file on disk.
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<PdfHeader> {
    let mut header = [0u8; HEADER_LEN];
    let mut file = File::open(path)?;
    let mut filled = 0;
    while filled < HEADER_LEN {
        let n = file.read(&mut header[filled..])?;
        if n == 0 {
            return Err(Error::UnknownFormat);
        }
        filled += n;
    }
    sniff_bytes(&header)
}

/// Read the header from the start of a byte buffer.
pub fn sniff_bytes(data: &[u8]) -> Result<PdfHeader> {
    if data.len() < HEADER_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version = String::from_utf8_lossy(&data[PDF_MAGIC.len()..HEADER_LEN]).to_string();
    match version.as_bytes() {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(PdfHeader { version })
        }
        _ => Err(Error::UnsupportedVersion(version)),
    }
}

/// Check whether a file starts with a PDF header.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    sniff_path(path).is_ok()
}

/// Check whether a byte buffer starts with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    sniff_bytes(data).is_ok()
}

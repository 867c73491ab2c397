//! Document-level information read from the PDF trailer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptive information about a PDF document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Total number of pages
    pub page_count: u32,

    /// Whether the document is encrypted
    pub encrypted: bool,

    /// Title from the Info dictionary (not the detected outline title)
    pub title: Option<String>,

    pub author: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

impl DocumentInfo {
    /// Create info for a document of the given version.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self {
            pdf_version: version.into(),
            ..Default::default()
        }
    }
}

/// Parse a PDF date string (`D:YYYYMMDDHHmmSS...`).
///
/// Missing trailing components default to the start of the period; the
/// timezone suffix is ignored and the result is treated as UTC.
pub fn parse_pdf_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);
    if s.len() < 4 {
        return None;
    }

    let field = |range: std::ops::Range<usize>, default: u32| -> u32 {
        s.get(range).and_then(|v| v.parse().ok()).unwrap_or(default)
    };

    let year: i32 = s.get(0..4)?.parse().ok()?;
    chrono::NaiveDate::from_ymd_opt(year, field(4..6, 1), field(6..8, 1))
        .and_then(|date| date.and_hms_opt(field(8..10, 0), field(10..12, 0), field(12..14, 0)))
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}

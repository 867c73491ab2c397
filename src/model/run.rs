//! Text runs: the unit of input to outline classification.

use serde::{Deserialize, Serialize};

/// One contiguous styled text fragment, in reading order.
///
/// Runs are produced by the extractor with trimmed, non-empty text and a
/// size already rounded to one decimal place. `font` and `page` travel with
/// the run but play no part in classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content (trimmed, never empty)
    pub text: String,
    /// Font name (e.g., "Helvetica-Bold")
    pub font: String,
    /// Effective font size in points, rounded to 0.1
    pub size: f32,
    /// 1-indexed page number
    pub page: u32,
}

impl TextRun {
    /// Create a run, rounding `size` to one decimal place.
    pub fn new(text: impl Into<String>, font: impl Into<String>, size: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            font: font.into(),
            size: round_size(size),
            page,
        }
    }

    /// The size in tenths of a point, used as an exact comparison key.
    pub fn size_key(&self) -> i32 {
        size_key(self.size)
    }
}

/// Round a font size to one decimal place.
///
/// Sizes that differ only by rendering jitter collapse to the same value.
pub fn round_size(size: f32) -> f32 {
    size_key(size) as f32 / 10.0
}

/// Convert a size in points to integer tenths of a point.
///
/// Rounds in `f64` with ties to even, so an exact `12.25` becomes `122`.
pub fn size_key(size: f32) -> i32 {
    (f64::from(size) * 10.0).round_ties_even() as i32
}

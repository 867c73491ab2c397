//! List item detection.

use std::sync::OnceLock;

use regex::Regex;

/// A glyph bullet (`-`, `•`, `*`, `·`) or an ordinal (`3.`, `12)`, `a.`)
/// at the start of the text, then whitespace, then content.
const BULLET_PATTERN: &str = r"^(?:[-•*·]\s+.+|(?:\d+|[A-Za-z])[.)]\s+.+)";

/// Decides whether a run's text is a list item.
#[derive(Debug, Clone)]
pub struct BulletDetector {
    pattern: Regex,
}

impl BulletDetector {
    /// Create a detector with the standard bullet pattern.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(BULLET_PATTERN).unwrap(),
        }
    }

    /// Check a trimmed run text.
    pub fn is_bullet(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

impl Default for BulletDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a trimmed run text with a shared detector.
pub fn is_bullet(text: &str) -> bool {
    static DETECTOR: OnceLock<BulletDetector> = OnceLock::new();
    DETECTOR.get_or_init(BulletDetector::new).is_bullet(text)
}

//! Run extraction options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for extracting text runs from PDF documents.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Page selection (which pages to read)
    pub pages: PageSelection,

    /// Normalize run text to Unicode NFC
    pub normalize_unicode: bool,

    /// Merge adjacent same-style fragments on one baseline into one run
    pub merge_spans: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable NFC normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Enable or disable span merging.
    pub fn with_span_merging(mut self, merge: bool) -> Self {
        self.merge_spans = merge;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            pages: PageSelection::All,
            normalize_unicode: true,
            merge_spans: true,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}

/// Page selection for extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed, sorted, no duplicates)
    Pages(Vec<u32>),
    /// Several ranges (inclusive, 1-indexed, sorted, disjoint, non-adjacent)
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.binary_search(&page).is_ok(),
            PageSelection::Ranges(ranges) => {
                let idx = ranges.partition_point(|range| *range.end() < page);
                ranges.get(idx).is_some_and(|range| range.contains(&page))
            }
        }
    }

    /// The highest page the selection refers to, if bounded.
    pub fn last_page(&self) -> Option<u32> {
        match self {
            PageSelection::All => None,
            PageSelection::Range(range) => Some(*range.end()),
            PageSelection::Pages(pages) => pages.last().copied(),
            PageSelection::Ranges(ranges) => ranges.last().map(|range| *range.end()),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5-7", "all").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            let (start, end) = match part.split_once('-') {
                Some((start, end)) => parse_bounds(s, start, end)?,
                None => {
                    let page = parse_page(s, part)?;
                    (page, page)
                }
            };
            ranges.push(start..=end);
        }

        let mut ranges = merge_ranges(ranges);
        if ranges.len() == 1 {
            return Ok(PageSelection::Range(ranges.remove(0)));
        }
        Ok(PageSelection::Ranges(ranges))
    }
}

/// Sort ranges and join the ones that overlap or touch.
fn merge_ranges(mut ranges: Vec<RangeInclusive<u32>>) -> Vec<RangeInclusive<u32>> {
    ranges.sort_unstable_by_key(|range| *range.start());

    let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if *range.start() <= last.end().saturating_add(1) => {
                let end = (*last.end()).max(*range.end());
                *last = *last.start()..=end;
            }
            _ => merged.push(range),
        }
    }
    merged
}

fn parse_page(selection: &str, part: &str) -> Result<u32> {
    match part.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(Error::InvalidPageRange(selection.to_string())),
    }
}

fn parse_bounds(selection: &str, start: &str, end: &str) -> Result<(u32, u32)> {
    let start = parse_page(selection, start)?;
    let end = parse_page(selection, end)?;
    if start > end {
        return Err(Error::InvalidPageRange(selection.to_string()));
    }
    Ok((start, end))
}

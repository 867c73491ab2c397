//! # pdfoutline
//!
//! Recover a document outline from the font sizes of a PDF's text.
//!
//! Text runs are pulled from the PDF content streams, the four largest
//! distinct font sizes become the title/h1/h2/h3 tiers, and a single pass
//! over the runs in reading order nests headings, body text and bullet
//! items into a fixed four-level tree.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{outline_file, render, JsonFormat};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = outline_file("document.pdf")?;
//!
//!     let json = render::to_json(&outline, JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Extraction** ([`parser`]): PDF → ordered [`TextRun`]s
//! - **Classification** ([`outline::classify_sizes`]): runs → [`SizeRankMap`]
//! - **Structuring** ([`outline::build_outline`]): runs + ranks → [`Outline`]
//! - **Rendering** ([`render`]): outline → JSON or Markdown

pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{is_pdf, sniff_bytes, sniff_path, PdfHeader};
pub use error::{Error, Result};
pub use model::{DocumentInfo, H1Section, H2Section, H3Section, Outline, Section, TextRun};
pub use outline::{OrphanPolicy, OutlineOptions, Rank, SizeRankMap, SizeStatistics};
pub use parser::{ErrorMode, ExtractOptions, LopdfBackend, PageSelection, RunExtractor};
pub use render::JsonFormat;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

/// Extract the ordered text runs of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_runs;
///
/// let runs = extract_runs("document.pdf").unwrap();
/// for run in runs.iter().take(5) {
///     println!("{:>5.1} {}", run.size, run.text);
/// }
/// ```
pub fn extract_runs<P: AsRef<Path>>(path: P) -> Result<Vec<TextRun>> {
    Outliner::new().extract_runs_file(path)
}

/// Build the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::outline_file;
///
/// let outline = outline_file("document.pdf").unwrap();
/// println!("{}: {} sections", outline.title, outline.h1.len());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Outline> {
    Outliner::new().outline_file(path)
}

/// Build the outline of a PDF held in memory.
pub fn outline_bytes(data: &[u8]) -> Result<Outline> {
    Outliner::new().outline_bytes(data)
}

/// Classify and structure runs that were extracted elsewhere.
///
/// This never fails: any run sequence, including an empty one, yields a
/// well-formed outline.
pub fn outline_from_runs(runs: &[TextRun]) -> Outline {
    Outliner::new().outline_runs(runs)
}

/// Convert a PDF file straight to outline JSON.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{to_json, JsonFormat};
///
/// let json = to_json("document.pdf", JsonFormat::Pretty).unwrap();
/// std::fs::write("output.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let outline = outline_file(path)?;
    render::to_json(&outline, format)
}

/// Read version, page count and `Info` dictionary of a PDF file.
pub fn document_info<P: AsRef<Path>>(path: P) -> Result<DocumentInfo> {
    Ok(LopdfBackend::load_file(path)?.info())
}

/// Outline many files in parallel.
///
/// Each document is classified and structured on its own; results come
/// back in input order, one per path.
pub fn outline_files<P>(paths: &[P], outliner: &Outliner) -> Vec<(PathBuf, Result<Outline>)>
where
    P: AsRef<Path> + Sync,
{
    outline_files_with(paths, outliner, |_, _| {})
}

/// Outline many files in parallel, calling `on_done` as each one finishes.
///
/// `on_done` runs on the worker thread that produced the result, in
/// completion order. The returned results are still in input order.
///
/// # Example
///
/// ```no_run
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use pdfoutline::{outline_files_with, Outliner};
///
/// let done = AtomicUsize::new(0);
/// let results = outline_files_with(&["a.pdf", "b.pdf"], &Outliner::new(), |path, _| {
///     let n = done.fetch_add(1, Ordering::Relaxed) + 1;
///     eprintln!("[{}/2] {}", n, path.display());
/// });
/// # let _ = results;
/// ```
pub fn outline_files_with<P, F>(
    paths: &[P],
    outliner: &Outliner,
    on_done: F,
) -> Vec<(PathBuf, Result<Outline>)>
where
    P: AsRef<Path> + Sync,
    F: Fn(&Path, &Result<Outline>) + Sync + Send,
{
    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let result = outliner.outline_file(path);
            on_done(path, &result);
            (path.to_path_buf(), result)
        })
        .collect()
}

/// Builder for extracting and outlining PDF documents.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{Outliner, PageSelection};
///
/// let outline = Outliner::new()
///     .lenient()
///     .with_pages(PageSelection::Range(1..=10))
///     .attach_orphans()
///     .outline_file("document.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    extract_options: ExtractOptions,
    outline_options: OutlineOptions,
}

impl Outliner {
    /// Create a new outliner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip unreadable pages instead of failing.
    pub fn lenient(mut self) -> Self {
        self.extract_options = self.extract_options.lenient();
        self
    }

    /// Restrict extraction to the selected pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages);
        self
    }

    /// Keep content that has no open parent section under synthetic
    /// sections instead of dropping it.
    pub fn attach_orphans(mut self) -> Self {
        self.outline_options = self.outline_options.attach_orphans();
        self
    }

    /// Replace the extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    /// Replace the structuring options.
    pub fn with_outline_options(mut self, options: OutlineOptions) -> Self {
        self.outline_options = options;
        self
    }

    /// Extraction options in effect.
    pub fn extract_options(&self) -> &ExtractOptions {
        &self.extract_options
    }

    /// Structuring options in effect.
    pub fn outline_options(&self) -> &OutlineOptions {
        &self.outline_options
    }

    /// Extract runs from a PDF file.
    pub fn extract_runs_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<TextRun>> {
        let backend = LopdfBackend::load_file(path)?;
        RunExtractor::new(self.extract_options.clone()).extract(&backend)
    }

    /// Extract runs from a PDF in memory.
    pub fn extract_runs_bytes(&self, data: &[u8]) -> Result<Vec<TextRun>> {
        let backend = LopdfBackend::load_bytes(data)?;
        RunExtractor::new(self.extract_options.clone()).extract(&backend)
    }

    /// Build the outline of a PDF file.
    pub fn outline_file<P: AsRef<Path>>(&self, path: P) -> Result<Outline> {
        let path = path.as_ref();
        log::debug!("outlining {}", path.display());
        let runs = self.extract_runs_file(path)?;
        Ok(self.outline_runs(&runs))
    }

    /// Build the outline of a PDF in memory.
    pub fn outline_bytes(&self, data: &[u8]) -> Result<Outline> {
        let runs = self.extract_runs_bytes(data)?;
        Ok(self.outline_runs(&runs))
    }

    /// Classify and structure an already extracted run sequence.
    pub fn outline_runs(&self, runs: &[TextRun]) -> Outline {
        let ranks = outline::classify_sizes(runs);
        log::debug!("{} runs, {} ranked sizes", runs.len(), ranks.len());
        outline::build_outline_with_options(runs, &ranks, &self.outline_options)
    }
}

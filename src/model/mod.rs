//! Data model shared by extraction, classification and rendering.
//!
//! [`TextRun`] is the input boundary of the outline core and [`Outline`]
//! its output boundary; [`DocumentInfo`] describes the source file.

mod info;
mod outline;
mod run;

pub use info::{parse_pdf_date, DocumentInfo};
pub use outline::{H1Section, H2Section, H3Section, Outline, Section};
pub use run::{round_size, size_key, TextRun};

//! Run extraction: turning PDF pages into an ordered sequence of text runs.

mod backend;
mod extractor;
mod options;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
};
pub use extractor::RunExtractor;
pub use options::{ErrorMode, ExtractOptions, PageSelection};

//! PDF text extraction.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF text extraction implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the loaded PDF.
    fn page_count(&self) -> u32;

    /// Extract the text of the whole document.
    fn extract_text(&self) -> Result<String>;
}

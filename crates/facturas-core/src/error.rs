//! Error types for the facturas-core library.

use thiserror::Error;

/// Main error type for the facturas library.
#[derive(Error, Debug)]
pub enum FacturasError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Processed-document tracking error.
    #[error("tracking error: {0}")]
    Tracking(#[from] TrackingError),

    /// The document source could not be listed.
    #[error("document source error: {0}")]
    Source(String),

    /// The document type is not handled by the text provider.
    #[error("unsupported document type: {0}")]
    Unsupported(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF parsed but carries no extractable text (likely a scan).
    #[error("no text could be extracted")]
    NoText,

    /// PDF support was compiled out.
    #[error("PDF support is disabled in this build")]
    Disabled,
}

/// Errors writing the processed-document tracking file.
///
/// Reading never produces one of these: an unreadable file loads as empty.
#[derive(Error, Debug)]
pub enum TrackingError {
    /// Failed to serialize the tracking set.
    #[error("failed to serialize tracking data: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write the tracking file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for the facturas library.
pub type Result<T> = std::result::Result<T, FacturasError>;

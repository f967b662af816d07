//! Core library for Argentine invoice field extraction.
//!
//! This crate provides:
//! - Rule-based extraction of invoice fields (CUIT, legal name, invoice type
//!   and number, dates, currency, CAE/CAI/CAEA, IVA, withholdings)
//! - Issuer disambiguation when several CUITs appear in one document
//! - Status classification (`OK`, `NEEDS_REVIEW`, `ERROR`) with review issues
//! - PDF text extraction and a local batch pipeline with processed-id tracking

pub mod error;
pub mod invoice;
pub mod models;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod pipeline;

pub use error::{FacturasError, PdfError, Result, TrackingError};
pub use invoice::{classify, Classification, InvoiceParser, RuleInvoiceParser};
pub use models::config::FacturasConfig;
pub use models::invoice::{
    AuthorizationKind, Currency, ExtractedFields, InvoiceRecord, InvoiceType, Status,
    TaxAuthorization, REPORT_HEADERS, SEE_SOURCE,
};
#[cfg(feature = "pdf")]
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::{
    process_batch, process_document, DocumentRef, DocumentSource, FileTextProvider,
    JsonTrackingStore, LocalDirectory, TextProvider, TrackingStore,
};

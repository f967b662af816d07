//! Document pipeline: source listing, text extraction, parsing and
//! processed-id tracking.
//!
//! Every collaborator sits behind a trait so the extraction core never touches
//! the filesystem directly. A document that fails at any step becomes an
//! `ERROR` record; nothing here aborts a batch.

mod source;
mod text;
mod tracking;

pub use source::LocalDirectory;
pub use text::FileTextProvider;
pub use tracking::{JsonTrackingStore, TrackingFile};

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;

use tracing::{info, warn};

use crate::invoice::InvoiceParser;
use crate::models::invoice::InvoiceRecord;
use crate::Result;

/// A document waiting to be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRef {
    /// Stable identifier used for processed-id tracking.
    pub id: String,
    /// Display name, reported as the record's file name.
    pub name: String,
    pub path: PathBuf,
}

/// Produces the raw text of a document.
pub trait TextProvider: Send + Sync {
    fn text(&self, doc: &DocumentRef) -> Result<String>;
}

/// Lists the documents available for processing.
pub trait DocumentSource {
    fn list(&self) -> Result<Vec<DocumentRef>>;
}

/// Persists the ids of documents already processed.
pub trait TrackingStore {
    /// Load processed ids. Never fails: unreadable data loads as empty.
    fn load(&self) -> HashSet<String>;

    fn save(&self, ids: &HashSet<String>) -> Result<()>;
}

/// Clean up extracted text: non-breaking spaces become spaces and the result
/// is trimmed.
pub fn normalize_extracted_text(raw: &str) -> String {
    raw.replace('\u{00A0}', " ").trim().to_string()
}

/// Documents whose id is not in `processed`, in listing order.
pub fn pending(docs: Vec<DocumentRef>, processed: &HashSet<String>) -> Vec<DocumentRef> {
    docs.into_iter().filter(|d| !processed.contains(&d.id)).collect()
}

/// Extract and parse one document.
///
/// Text extraction errors and panics inside the provider or parser produce a
/// failed record carrying the error message.
pub fn process_document(
    provider: &dyn TextProvider,
    parser: &dyn InvoiceParser,
    doc: &DocumentRef,
) -> InvoiceRecord {
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        provider
            .text(doc)
            .map(|text| parser.parse(&normalize_extracted_text(&text), &doc.name))
    }));

    match outcome {
        Ok(Ok(record)) => {
            info!("{}: {}", doc.name, record.status());
            record
        }
        Ok(Err(e)) => {
            warn!("Failed to process {}: {}", doc.name, e);
            InvoiceRecord::failed(&doc.name, e.to_string())
        }
        Err(panic) => {
            let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "processing panicked".to_string()
            };
            warn!("Processing {} panicked: {}", doc.name, msg);
            InvoiceRecord::failed(&doc.name, format!("Processing crashed: {msg}"))
        }
    }
}

/// Process documents one after another. Output order equals input order.
pub fn process_batch(
    provider: &dyn TextProvider,
    parser: &dyn InvoiceParser,
    docs: &[DocumentRef],
) -> Vec<InvoiceRecord> {
    docs.iter()
        .map(|doc| process_document(provider, parser, doc))
        .collect()
}

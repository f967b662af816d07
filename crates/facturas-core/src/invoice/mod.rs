//! Invoice field extraction and status classification.

pub mod classifier;
mod parser;
pub mod rules;

pub use classifier::{classify, missing_fields, Classification};
pub use parser::{InvoiceParser, RuleInvoiceParser};

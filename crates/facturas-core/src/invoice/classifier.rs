//! Status classification of extracted invoice fields.

use crate::models::invoice::{Currency, ExtractedFields, InvoiceType, Status};

/// Missing required fields at which a record is an error.
const ERROR_THRESHOLD: usize = 3;

pub const UNASSIGNED_CAE_ISSUE: &str = "CAE present but marked SIN ASIGNAR";
pub const TYPE_X_ISSUE: &str = "Type X invoice: CAE/CAI/CAEA may be absent (manual review)";
pub const USD_WITHOUT_RATE_ISSUE: &str = "USD currency without exchange rate (TC)";
pub const NO_LINE_ITEMS_ISSUE: &str = "Could not identify line-item block";

/// Status and issues derived from a set of extracted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: Status,
    pub issues: Vec<String>,
}

/// Names of the required fields that were not found, in report order.
pub fn missing_fields(fields: &ExtractedFields) -> Vec<&'static str> {
    [
        ("legal_name", fields.legal_name.is_some()),
        ("tax_id", fields.tax_id.is_some()),
        ("invoice_type", fields.invoice_type.is_some()),
        ("invoice_number", fields.invoice_number.is_some()),
        ("issue_date", fields.issue_date.is_some()),
    ]
    .into_iter()
    .filter(|(_, present)| !present)
    .map(|(name, _)| name)
    .collect()
}

/// Derive status and issues.
///
/// The base status comes from the number of missing required fields. The
/// follow-up rules run in a fixed order and only ever move the status one
/// step toward review: a type X invoice without authorization always ends
/// in review, while a USD amount without exchange rate or a missing
/// line-item block flag an otherwise clean record for review.
pub fn classify(fields: &ExtractedFields) -> Classification {
    let mut issues = Vec::new();

    if fields.authorization.as_ref().is_some_and(|a| a.is_unassigned()) {
        issues.push(UNASSIGNED_CAE_ISSUE.to_string());
    }

    let missing = missing_fields(fields);
    let mut status = match missing.len() {
        0 => Status::Ok,
        n if n >= ERROR_THRESHOLD => Status::Error,
        _ => Status::NeedsReview,
    };

    if fields.invoice_type == Some(InvoiceType::X) && fields.authorization.is_none() {
        status = Status::NeedsReview;
        issues.push(TYPE_X_ISSUE.to_string());
    }

    if fields.currency == Some(Currency::Usd) && fields.exchange_rate.is_none() {
        if status == Status::Ok {
            status = Status::NeedsReview;
        }
        issues.push(USD_WITHOUT_RATE_ISSUE.to_string());
    }

    if fields.line_items.is_none() {
        if status == Status::Ok {
            status = Status::NeedsReview;
        }
        issues.push(NO_LINE_ITEMS_ISSUE.to_string());
    }

    if !missing.is_empty() {
        issues.push(format!("Missing fields: {}", missing.join(", ")));
    }

    Classification { status, issues }
}

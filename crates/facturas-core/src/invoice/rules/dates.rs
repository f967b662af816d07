//! Issue date extraction.

use super::patterns::{ISSUE_DATE_EMISSION, ISSUE_DATE_LABEL, ISSUE_DATE_WORD};
use super::{CaptureMatcher, MatcherChain};

/// Normalize date separators: `dd.mm.yyyy` becomes `dd/mm/yyyy`.
///
/// Day and month are kept as printed; no calendar validation is done.
pub fn normalize_date(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    Some(raw.replace('.', "/"))
}

pub fn issue_date_chain() -> MatcherChain {
    MatcherChain::new("issue_date")
        .then(CaptureMatcher::new("fecha_word", &ISSUE_DATE_WORD).with_normalizer(normalize_date))
        .then(CaptureMatcher::new("fecha_label", &ISSUE_DATE_LABEL).with_normalizer(normalize_date))
        .then(
            CaptureMatcher::new("fecha_de_emision", &ISSUE_DATE_EMISSION)
                .with_normalizer(normalize_date),
        )
}

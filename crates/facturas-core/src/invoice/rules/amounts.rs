//! Tax (IVA) and withholding amounts.
//!
//! Amount columns rarely survive text extraction in a usable layout, so these
//! are best effort: the last amount on a labeled line, or [`SEE_SOURCE`] when
//! the concept is mentioned but no amount sits next to it.

use regex::Regex;

use super::patterns::{AMOUNT_TOKEN, IVA_LINE, IVA_MENTION, WITHHOLDING_LINE, WITHHOLDING_MENTION};
use crate::models::invoice::SEE_SOURCE;

/// IVA amount, from the first `IVA` line that carries an amount.
pub fn extract_tax_amount(text: &str) -> Option<String> {
    labeled_amount(&IVA_LINE, text).or_else(|| mention(&IVA_MENTION, text))
}

/// Withholding amount, from the first `Retención`/`Retenciones` line that
/// carries an amount. Perception and gross income tax labels only mark the
/// field for review.
pub fn extract_withholding(text: &str) -> Option<String> {
    labeled_amount(&WITHHOLDING_LINE, text).or_else(|| mention(&WITHHOLDING_MENTION, text))
}

fn labeled_amount(line: &Regex, text: &str) -> Option<String> {
    line.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .find_map(|rest| last_amount(rest.as_str()))
}

fn last_amount(segment: &str) -> Option<String> {
    AMOUNT_TOKEN
        .find_iter(segment)
        .last()
        .map(|m| m.as_str().trim().to_string())
}

fn mention(pattern: &Regex, text: &str) -> Option<String> {
    pattern.is_match(text).then(|| SEE_SOURCE.to_string())
}

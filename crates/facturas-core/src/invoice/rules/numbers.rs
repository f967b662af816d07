//! Invoice number (point of sale and sequence) extraction.

use super::patterns::{INVOICE_NUMBER, INVOICE_NUMBER_FIVE_DIGIT_POS, INVOICE_NUMBER_LABELED};
use super::{CaptureMatcher, MatcherChain};

/// `PPPP-NNNNNNNN` with an optional letter suffix, then the labeled form,
/// then the five digit point-of-sale form used since 2019.
pub fn invoice_number_chain() -> MatcherChain {
    MatcherChain::new("invoice_number")
        .then(CaptureMatcher::new("pos_sequence", &INVOICE_NUMBER))
        .then(CaptureMatcher::new("numero_label", &INVOICE_NUMBER_LABELED))
        .then(CaptureMatcher::new("five_digit_pos", &INVOICE_NUMBER_FIVE_DIGIT_POS))
}

//! Invoice type letter detection (A, B, C, X).
//!
//! The letter is often printed in a box apart from the word `FACTURA`, so the
//! labeled patterns tolerate line breaks between label and letter. Two
//! positional fallbacks follow when no label pairs up with a letter.

use super::patterns::{
    FACTURA_WORD, STANDALONE_TYPE_LETTER, TYPE_AFTER_CODIGO, TYPE_AFTER_COMPROBANTE,
    TYPE_AFTER_FACTURA, TYPE_BEFORE_CODIGO, TYPE_BEFORE_COMPROBANTE,
};
use super::{chars_after, CaptureMatcher, FieldMatcher, MatcherChain};

/// First standalone uppercase letter within a window starting at `FACTURA`.
pub struct LetterNearLabel {
    window: usize,
}

impl LetterNearLabel {
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl FieldMatcher for LetterNearLabel {
    fn name(&self) -> &str {
        "letter_near_factura"
    }

    fn find(&self, text: &str) -> Option<String> {
        let label = FACTURA_WORD.find(text)?;
        let window = chars_after(text, label.start(), self.window);
        first_letter(window)
    }
}

/// First standalone uppercase letter at the very top of the document.
///
/// Last resort: header boxes usually land in the first few hundred
/// characters of extracted text.
pub struct LetterInPrefix {
    len: usize,
}

impl LetterInPrefix {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl FieldMatcher for LetterInPrefix {
    fn name(&self) -> &str {
        "letter_in_prefix"
    }

    fn find(&self, text: &str) -> Option<String> {
        first_letter(chars_after(text, 0, self.len))
    }
}

/// Detection order for the invoice type letter.
pub fn invoice_type_chain() -> MatcherChain {
    MatcherChain::new("invoice_type")
        .then(CaptureMatcher::new("after_factura", &TYPE_AFTER_FACTURA).with_normalizer(upper))
        .then(
            CaptureMatcher::new("after_comprobante", &TYPE_AFTER_COMPROBANTE)
                .with_normalizer(upper),
        )
        .then(CaptureMatcher::new("after_codigo", &TYPE_AFTER_CODIGO).with_normalizer(upper))
        .then(CaptureMatcher::new("before_codigo", &TYPE_BEFORE_CODIGO).with_normalizer(upper))
        .then(
            CaptureMatcher::new("before_comprobante", &TYPE_BEFORE_COMPROBANTE)
                .with_normalizer(upper),
        )
        .then(LetterNearLabel::new(200))
        .then(LetterInPrefix::new(500))
}

fn first_letter(window: &str) -> Option<String> {
    STANDALONE_TYPE_LETTER
        .captures(window)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn upper(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_uppercase())
    }
}

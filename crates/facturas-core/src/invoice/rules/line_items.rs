//! Line-item block and column presence flags.

use super::chars_after;
use super::patterns::{LINE_AMOUNT, LINE_ITEMS_LABEL, QUANTITY_COLUMN, UNIT_PRICE_COLUMN};
use crate::models::invoice::SEE_SOURCE;

/// Characters kept after the line-item label.
const BLOCK_LEN: usize = 900;
/// Longest description line paired with an amount line.
const MAX_DESCRIPTION_LEN: usize = 120;
const MAX_PAIRS: usize = 10;

/// Raw line-item block.
///
/// With a `Detalle`/`Descripción`/`Concepto` label, the label and the
/// following characters are kept verbatim. Without one, lines carrying a
/// decimal amount are paired with the line above them.
pub fn extract_line_items(text: &str) -> Option<String> {
    if let Some(label) = LINE_ITEMS_LABEL.find(text) {
        let tail = chars_after(text, label.end(), BLOCK_LEN);
        let end = label.end() + tail.len();
        return Some(text[label.start()..end].trim().to_string());
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let pairs: Vec<String> = lines
        .windows(2)
        .filter(|w| LINE_AMOUNT.is_match(w[1]) && w[0].chars().count() < MAX_DESCRIPTION_LEN)
        .map(|w| format!("{} {}", w[0], w[1]))
        .take(MAX_PAIRS)
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join(" | "))
    }
}

/// [`SEE_SOURCE`] when a quantity column header is present.
pub fn quantity_flag(text: &str) -> Option<String> {
    QUANTITY_COLUMN.is_match(text).then(|| SEE_SOURCE.to_string())
}

/// [`SEE_SOURCE`] when a unit price column header is present.
pub fn unit_price_flag(text: &str) -> Option<String> {
    UNIT_PRICE_COLUMN.is_match(text).then(|| SEE_SOURCE.to_string())
}

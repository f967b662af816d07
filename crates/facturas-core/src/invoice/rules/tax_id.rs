//! CUIT (Argentine tax ID) normalization and candidate scanning.

use tracing::trace;

use super::patterns::{CUIT_BARE, CUIT_LABELED};
use super::{chars_after, chars_before, CaptureMatcher, MatcherChain};

/// Normalize a CUIT-like string.
///
/// Non-digits are dropped. Eleven digits are grouped as `DD-DDDDDDDD-D`; any
/// other non-zero count is returned as the bare digit string.
pub fn normalize_cuit(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        0 => None,
        11 => Some(format!("{}-{}-{}", &digits[0..2], &digits[2..10], &digits[10..])),
        _ => Some(digits),
    }
}

/// Single-pattern CUIT fallback used when no candidate could be scored.
pub fn tax_id_chain() -> MatcherChain {
    MatcherChain::new("tax_id")
        .then(CaptureMatcher::new("cuit_labeled", &CUIT_LABELED).with_normalizer(normalize_cuit))
        .then(CaptureMatcher::new("cuit_bare", &CUIT_BARE).with_normalizer(normalize_cuit))
}

/// A CUIT label occurrence with the text around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxIdMatch<'a> {
    /// Normalized CUIT.
    pub tax_id: String,
    /// Byte offset of the label in the scanned text.
    pub offset: usize,
    /// Context ending at the label.
    pub before: &'a str,
    /// Context starting at the label.
    pub after: &'a str,
}

/// Finds every labeled CUIT in a text.
#[derive(Debug, Clone)]
pub struct TaxIdScanner {
    window: usize,
}

impl TaxIdScanner {
    /// Create a scanner capturing `window` characters on each side.
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn scan<'a>(&self, text: &'a str) -> Vec<TaxIdMatch<'a>> {
        CUIT_LABELED
            .captures_iter(text)
            .filter_map(|caps| {
                let full = caps.get(0)?;
                let tax_id = normalize_cuit(caps.get(1)?.as_str())?;
                let offset = full.start();
                trace!(offset, %tax_id, "CUIT candidate");

                Some(TaxIdMatch {
                    tax_id,
                    offset,
                    before: chars_before(text, offset, self.window),
                    after: chars_after(text, offset, self.window),
                })
            })
            .collect()
    }
}

impl Default for TaxIdScanner {
    fn default() -> Self {
        Self::new(250)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_eleven_digits() {
        assert_eq!(normalize_cuit("30123456789"), Some("30-12345678-9".to_string()));
        assert_eq!(normalize_cuit("30.12345678.9"), Some("30-12345678-9".to_string()));
        assert_eq!(normalize_cuit(" 30 12345678 9 "), Some("30-12345678-9".to_string()));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_cuit("30-12345678-9").unwrap();
        assert_eq!(once, "30-12345678-9");
        assert_eq!(normalize_cuit(&once), Some(once.clone()));
    }

    #[test]
    fn test_normalize_preserves_digit_order() {
        for raw in ["20111222333", "27000000001", "33987654329"] {
            let formatted = normalize_cuit(raw).unwrap();
            assert_eq!(formatted.len(), 13);
            assert_eq!(formatted.matches('-').count(), 2);
            assert_eq!(formatted.replace('-', ""), raw);
        }
    }

    #[test]
    fn test_normalize_other_lengths() {
        assert_eq!(normalize_cuit("123-456"), Some("123456".to_string()));
        assert_eq!(normalize_cuit("301234567890"), Some("301234567890".to_string()));
        assert_eq!(normalize_cuit("- . -"), None);
        assert_eq!(normalize_cuit(""), None);
    }

    #[test]
    fn test_scan_finds_every_label() {
        let text = "ACME S.A.\nCUIT: 30-12345678-9\nCliente\nC.U.I.T. Nro. 20-11122233-3";
        let matches = TaxIdScanner::default().scan(text);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].tax_id, "30-12345678-9");
        assert_eq!(matches[0].before, "ACME S.A.\n");
        assert!(matches[0].after.starts_with("CUIT: 30-12345678-9"));
        assert_eq!(matches[1].tax_id, "20-11122233-3");
        assert!(matches[1].offset > matches[0].offset);
    }

    #[test]
    fn test_scan_window_is_bounded() {
        let filler = "x".repeat(400);
        let text = format!("{filler}\nCUIT 30123456789\n{filler}");
        let matches = TaxIdScanner::new(250).scan(&text);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].before.chars().count(), 250);
        assert_eq!(matches[0].after.chars().count(), 250);
    }

    #[test]
    fn test_tax_id_chain_fallbacks() {
        let chain = tax_id_chain();
        assert_eq!(chain.find("C.U.I.T.: 30-12345678-9"), Some("30-12345678-9".to_string()));
        assert_eq!(chain.find("Sin identificación"), None);
    }
}

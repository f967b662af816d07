//! Rule-based field matchers for Argentine invoices.

pub mod amounts;
pub mod authorization;
pub mod currency;
pub mod dates;
pub mod invoice_type;
pub mod issuer;
pub mod line_items;
pub mod numbers;
pub mod patterns;
pub mod tax_id;

pub use authorization::detect_authorization;
pub use currency::{detect_currency, exchange_rate_chain};
pub use issuer::{Candidate, CandidateScorer, ContextScorer, IssuerResolver};
pub use tax_id::{normalize_cuit, TaxIdMatch, TaxIdScanner};

use regex::Regex;
use tracing::trace;

/// A single way of finding a field value in text.
pub trait FieldMatcher: Send + Sync {
    /// Short name used in logs and tests.
    fn name(&self) -> &str;

    /// Find the field value, if this matcher recognizes it.
    fn find(&self, text: &str) -> Option<String>;
}

/// Matcher that reads capture group 1 of the first regex match.
///
/// Only the first match is considered; the captured text is trimmed and then
/// passed through the normalizer, which may still reject it.
pub struct CaptureMatcher {
    name: &'static str,
    pattern: &'static Regex,
    normalize: fn(&str) -> Option<String>,
}

impl CaptureMatcher {
    pub fn new(name: &'static str, pattern: &'static Regex) -> Self {
        Self {
            name,
            pattern,
            normalize: non_empty,
        }
    }

    /// Replace the default non-empty check with a field normalizer.
    pub fn with_normalizer(mut self, normalize: fn(&str) -> Option<String>) -> Self {
        self.normalize = normalize;
        self
    }
}

impl FieldMatcher for CaptureMatcher {
    fn name(&self) -> &str {
        self.name
    }

    fn find(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        let raw = caps.get(1)?.as_str().trim();
        (self.normalize)(raw)
    }
}

/// Ordered fallback chain: the first matcher that finds a value wins.
pub struct MatcherChain {
    field: &'static str,
    matchers: Vec<Box<dyn FieldMatcher>>,
}

impl MatcherChain {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            matchers: Vec::new(),
        }
    }

    /// Append a lower-priority alternative.
    pub fn then(mut self, matcher: impl FieldMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    pub fn field(&self) -> &str {
        self.field
    }

    /// Alternatives in priority order.
    pub fn matchers(&self) -> impl Iterator<Item = &dyn FieldMatcher> {
        self.matchers.iter().map(|m| m.as_ref())
    }

    pub fn find(&self, text: &str) -> Option<String> {
        self.matchers.iter().find_map(|matcher| {
            let value = matcher.find(text)?;
            trace!(field = self.field, matcher = matcher.name(), %value, "field matched");
            Some(value)
        })
    }
}

/// Default normalizer: keep anything non-empty.
pub fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// At most `n` characters of `text` ending at byte offset `end`.
pub fn chars_before(text: &str, end: usize, n: usize) -> &str {
    let head = &text[..end];
    if n == 0 {
        return "";
    }
    let start = head
        .char_indices()
        .rev()
        .nth(n - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &head[start..]
}

/// At most `n` characters of `text` starting at byte offset `start`.
pub fn chars_after(text: &str, start: usize, n: usize) -> &str {
    let tail = &text[start..];
    let end = tail
        .char_indices()
        .nth(n)
        .map(|(i, _)| i)
        .unwrap_or(tail.len());
    &tail[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref FIRST: Regex = Regex::new(r"uno:(\w+)").unwrap();
        static ref SECOND: Regex = Regex::new(r"dos:(\w+)").unwrap();
    }

    fn shout(s: &str) -> Option<String> {
        Some(s.to_uppercase())
    }

    #[test]
    fn test_chain_first_match_wins() {
        let chain = MatcherChain::new("demo")
            .then(CaptureMatcher::new("first", &FIRST))
            .then(CaptureMatcher::new("second", &SECOND));

        assert_eq!(chain.find("dos:b uno:a"), Some("a".to_string()));
        assert_eq!(chain.find("dos:b"), Some("b".to_string()));
        assert_eq!(chain.find("nada"), None);
    }

    #[test]
    fn test_chain_exposes_priority_order() {
        let chain = MatcherChain::new("demo")
            .then(CaptureMatcher::new("first", &FIRST))
            .then(CaptureMatcher::new("second", &SECOND));

        let names: Vec<&str> = chain.matchers().map(|m| m.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(chain.field(), "demo");
    }

    #[test]
    fn test_capture_matcher_normalizer() {
        let matcher = CaptureMatcher::new("first", &FIRST).with_normalizer(shout);
        assert_eq!(matcher.find("uno:abc"), Some("ABC".to_string()));
    }

    #[test]
    fn test_char_windows() {
        let text = "año: ñandú";
        let idx = text.find("ñandú").unwrap();

        assert_eq!(chars_before(text, idx, 3), "o: ");
        assert_eq!(chars_before(text, idx, 100), "año: ");
        assert_eq!(chars_before(text, idx, 0), "");
        assert_eq!(chars_after(text, idx, 2), "ña");
        assert_eq!(chars_after(text, idx, 100), "ñandú");
    }
}

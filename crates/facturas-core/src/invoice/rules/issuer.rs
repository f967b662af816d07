//! Issuer resolution: picks the issuer's CUIT and legal name when an invoice
//! prints both the issuer's and the customer's.
//!
//! Every labeled CUIT becomes a [`Candidate`]. Its name guess is the last
//! non-empty line before the label, and a [`CandidateScorer`] rates how much
//! it looks like the issuer. The highest score wins; ties go to the candidate
//! found first.

use regex::Regex;
use tracing::{debug, warn};

use super::patterns::{
    COMPANY_LINE, COMPANY_SUFFIX, CUSTOMER_ROLE, ISSUER_NAME_LABEL, ISSUER_ROLE, LEGAL_NAME_LABEL,
};
use super::{CaptureMatcher, MatcherChain, TaxIdMatch, TaxIdScanner};

/// A scored issuer candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Normalized CUIT.
    pub tax_id: String,
    /// Probable legal name, taken from the line above the CUIT.
    pub name: Option<String>,
    pub score: i32,
    /// Byte offset of the CUIT label in the line-trimmed text.
    pub offset: usize,
}

/// Rates how likely a CUIT occurrence belongs to the invoice issuer.
pub trait CandidateScorer: Send + Sync {
    fn score(&self, name: Option<&str>, context: &TaxIdMatch<'_>) -> i32;
}

/// Default scorer built on company suffixes, role labels and a list of known
/// counterparty name fragments.
///
/// The counterparty list is specific to one customer population; documents
/// from other recipients need their own list (see `ExtractionConfig`).
pub struct ContextScorer {
    counterparty: Option<Regex>,
}

impl ContextScorer {
    pub fn new<S: AsRef<str>>(counterparty_tokens: &[S]) -> Self {
        let alternatives: Vec<String> = counterparty_tokens
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .map(regex::escape)
            .collect();

        let counterparty = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
            match Regex::new(&pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Ignoring counterparty tokens: {}", e);
                    None
                }
            }
        };

        Self { counterparty }
    }
}

impl Default for ContextScorer {
    fn default() -> Self {
        Self::new(&["PATAGONIA", "BEVERAGE"])
    }
}

impl CandidateScorer for ContextScorer {
    fn score(&self, name: Option<&str>, context: &TaxIdMatch<'_>) -> i32 {
        let mut score = 0;

        if let Some(name) = name {
            if COMPANY_SUFFIX.is_match(name) {
                score += 3;
            }
            if name.chars().count() >= 5 {
                score += 1;
            }
            if self.counterparty.as_ref().is_some_and(|re| re.is_match(name)) {
                score -= 5;
            }
        }

        if CUSTOMER_ROLE.is_match(context.before) {
            score -= 1;
        }
        if ISSUER_ROLE.is_match(context.before) || ISSUER_ROLE.is_match(context.after) {
            score += 1;
        }

        score
    }
}

/// Resolves the issuer among all CUIT occurrences of a document.
pub struct IssuerResolver {
    scanner: TaxIdScanner,
    scorer: Box<dyn CandidateScorer>,
}

impl IssuerResolver {
    pub fn new(scanner: TaxIdScanner, scorer: impl CandidateScorer + 'static) -> Self {
        Self {
            scanner,
            scorer: Box::new(scorer),
        }
    }

    /// Score every CUIT occurrence, in text order.
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        let joined = trim_lines(text);

        self.scanner
            .scan(&joined)
            .iter()
            .map(|m| {
                let name = last_line(m.before);
                let score = self.scorer.score(name, m);
                Candidate {
                    tax_id: m.tax_id.clone(),
                    name: name.map(str::to_string),
                    score,
                    offset: m.offset,
                }
            })
            .collect()
    }

    /// The best-scoring candidate, or `None` when no CUIT label was found.
    pub fn resolve(&self, text: &str) -> Option<Candidate> {
        let candidates = self.candidates(text);
        let count = candidates.len();

        let best = candidates.into_iter().fold(None, |best: Option<Candidate>, c| match best {
            Some(b) if b.score >= c.score => Some(b),
            _ => Some(c),
        })?;

        debug!(
            "Issuer CUIT {} (score {}) chosen among {} candidates",
            best.tax_id, best.score, count
        );
        Some(best)
    }
}

impl Default for IssuerResolver {
    fn default() -> Self {
        Self::new(TaxIdScanner::default(), ContextScorer::default())
    }
}

/// Label-based legal name fallback, used when issuer resolution gives no name.
pub fn legal_name_chain() -> MatcherChain {
    MatcherChain::new("legal_name")
        .then(CaptureMatcher::new("razon_social_label", &LEGAL_NAME_LABEL))
        .then(CaptureMatcher::new("emisor_label", &ISSUER_NAME_LABEL))
        .then(CaptureMatcher::new("company_line", &COMPANY_LINE))
}

fn trim_lines(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join("\n")
}

fn last_line(context: &str) -> Option<&str> {
    context.split('\n').map(str::trim).filter(|l| !l.is_empty()).last()
}

//! Rule-based invoice parser.

use std::time::Instant;

use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::invoice::{ExtractedFields, InvoiceRecord, InvoiceType};

use super::rules::{
    amounts::{extract_tax_amount, extract_withholding},
    dates::issue_date_chain,
    detect_authorization, detect_currency, exchange_rate_chain,
    invoice_type::invoice_type_chain,
    issuer::legal_name_chain,
    line_items::{extract_line_items, quantity_flag, unit_price_flag},
    numbers::invoice_number_chain,
    tax_id::tax_id_chain,
    ContextScorer, IssuerResolver, MatcherChain, TaxIdScanner,
};

/// Trait for invoice parsing.
///
/// Parsing never fails: fields that cannot be found are left empty and the
/// record's status tells how usable it is.
pub trait InvoiceParser: Send + Sync {
    /// Parse one document's text into a classified record.
    fn parse(&self, text: &str, file_name: &str) -> InvoiceRecord;
}

/// Parser built from regex rules and issuer scoring.
pub struct RuleInvoiceParser {
    issuer: IssuerResolver,
    legal_name: MatcherChain,
    tax_id: MatcherChain,
    invoice_type: MatcherChain,
    invoice_number: MatcherChain,
    issue_date: MatcherChain,
    exchange_rate: MatcherChain,
}

impl RuleInvoiceParser {
    /// Create a parser with default extraction settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        let scanner = TaxIdScanner::new(config.context_window);
        let scorer = ContextScorer::new(config.counterparty_tokens.as_slice());

        Self {
            issuer: IssuerResolver::new(scanner, scorer),
            legal_name: legal_name_chain(),
            tax_id: tax_id_chain(),
            invoice_type: invoice_type_chain(),
            invoice_number: invoice_number_chain(),
            issue_date: issue_date_chain(),
            exchange_rate: exchange_rate_chain(),
        }
    }

    /// Extract every field from normalized document text.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let issuer = self.issuer.resolve(text);
        let (issuer_tax_id, issuer_name) = match issuer {
            Some(candidate) => (Some(candidate.tax_id), candidate.name),
            None => (None, None),
        };

        let tax_id = issuer_tax_id.or_else(|| self.tax_id.find(text));
        let legal_name = issuer_name.or_else(|| self.legal_name.find(text));

        let invoice_type = self
            .invoice_type
            .find(text)
            .and_then(|letter| InvoiceType::from_letter(&letter));

        let fields = ExtractedFields {
            legal_name,
            tax_id,
            invoice_type,
            invoice_number: self.invoice_number.find(text),
            issue_date: self.issue_date.find(text),
            currency: detect_currency(text),
            exchange_rate: self.exchange_rate.find(text),
            authorization: detect_authorization(text),
            line_items: extract_line_items(text),
            quantity: quantity_flag(text),
            unit_price: unit_price_flag(text),
            withholding: extract_withholding(text),
            tax_amount: extract_tax_amount(text),
        };

        debug!(
            "Fields: cuit={:?} type={:?} number={:?} date={:?} currency={:?}",
            fields.tax_id, fields.invoice_type, fields.invoice_number, fields.issue_date, fields.currency
        );

        fields
    }
}

impl Default for RuleInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for RuleInvoiceParser {
    fn parse(&self, text: &str, file_name: &str) -> InvoiceRecord {
        let start = Instant::now();

        info!("Parsing {} from {} characters of text", file_name, text.len());

        let record = InvoiceRecord::new(self.extract(text), file_name);

        debug!(
            "Parsed {} as {} with {} issues in {} ms",
            file_name,
            record.status(),
            record.issues().len(),
            start.elapsed().as_millis()
        );

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::{AuthorizationKind, Currency, Status, SEE_SOURCE};
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
ORIGINAL
FACTURA
A
Cód. 01
DISTRIBUIDORA DEL SUR S.A.
C.U.I.T.: 30-71234567-8
Punto de Venta: 0003 Comp. Nro: 0003-00001234
Fecha de Emisión: 05.03.2024
Señor(es):
PATAGONIA BEVERAGE SA
CUIT: 30-98765432-1
Descripción Cant. P. Unit. Subtotal
Cajas de cartón 100 12,50 1.250,00
Subtotal $ 1.250,00
IVA 21% $ 262,50
Percepción IIBB $ 37,50
Total $ 1.550,00
CAE N°: 74123456789012
";

    #[test]
    fn test_parse_complete_invoice() {
        let record = RuleInvoiceParser::new().parse(SAMPLE, "factura-0003-1234.pdf");

        assert_eq!(record.legal_name.as_deref(), Some("DISTRIBUIDORA DEL SUR S.A."));
        assert_eq!(record.tax_id.as_deref(), Some("30-71234567-8"));
        assert_eq!(record.invoice_type, Some(InvoiceType::A));
        assert_eq!(record.invoice_number.as_deref(), Some("0003-00001234"));
        assert_eq!(record.issue_date.as_deref(), Some("05/03/2024"));
        assert_eq!(record.currency, Some(Currency::Ars));
        assert_eq!(record.exchange_rate, None);
        assert_eq!(record.authorization_kind, Some(AuthorizationKind::Cae));
        assert_eq!(record.authorization_value.as_deref(), Some("74123456789012"));
        assert_eq!(record.quantity.as_deref(), Some(SEE_SOURCE));
        assert_eq!(record.unit_price.as_deref(), Some(SEE_SOURCE));
        assert_eq!(record.tax_amount.as_deref(), Some("$ 262,50"));
        assert_eq!(record.withholding.as_deref(), Some(SEE_SOURCE));
        assert!(record.line_items.as_deref().unwrap().starts_with("Descripción"));
        assert_eq!(record.status(), Status::Ok);
        assert!(record.issues().is_empty());
        assert_eq!(record.file_name, "factura-0003-1234.pdf");
    }

    #[test]
    fn test_parse_empty_text() {
        let record = RuleInvoiceParser::new().parse("", "vacio.pdf");
        assert_eq!(record.status(), Status::Error);
        assert_eq!(record.tax_id, None);
        assert_eq!(record.line_items, None);
    }

    #[test]
    fn test_falls_back_to_labels_without_cuit() {
        let text = "Razón Social: Servicios Norte SRL\nFactura B\n";
        let fields = RuleInvoiceParser::new().extract(text);

        assert_eq!(fields.legal_name.as_deref(), Some("Servicios Norte SRL"));
        assert_eq!(fields.invoice_type, Some(InvoiceType::B));
        assert_eq!(fields.tax_id, None);
    }

    #[test]
    fn test_counterparty_tokens_from_config() {
        let text = "ALFA SA\nCUIT 30-11111111-1\nBETA SA\nCUIT 30-22222222-2";

        let default = RuleInvoiceParser::new().extract(text);
        assert_eq!(default.tax_id.as_deref(), Some("30-11111111-1"));

        let config = ExtractionConfig {
            counterparty_tokens: vec!["ALFA".to_string()],
            ..Default::default()
        };
        let custom = RuleInvoiceParser::from_config(&config).extract(text);
        assert_eq!(custom.tax_id.as_deref(), Some("30-22222222-2"));
        assert_eq!(custom.legal_name.as_deref(), Some("BETA SA"));
    }

    #[test]
    fn test_parse_usd_invoice_without_rate() {
        let text = "FACTURA A\nACME S.A.\nCUIT 30-12345678-9\nN° 0001-00000001\nFecha 01/02/2024\nDetalle servicios\nTotal USD 100,00";
        let record = RuleInvoiceParser::new().parse(text, "usd.txt");

        assert_eq!(record.currency, Some(Currency::Usd));
        assert_eq!(record.status(), Status::NeedsReview);
        assert!(record.issues().iter().any(|i| i.contains("USD")));
    }

    #[test]
    fn test_type_x_without_authorization_needs_review() {
        let text = "FACTURA X\nACME S.A.\nCUIT 30-12345678-9\nN° 0001-00000001\nFecha 01/02/2024\nDetalle servicios 100,00";
        let record = RuleInvoiceParser::new().parse(text, "x.txt");

        assert_eq!(record.invoice_type, Some(InvoiceType::X));
        assert_eq!(record.authorization_kind, None);
        assert_eq!(record.status(), Status::NeedsReview);
        assert!(record.issues().iter().any(|i| i.starts_with("Type X invoice")));
    }
}

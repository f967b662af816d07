//! Currency and exchange rate detection.

use super::patterns::{CURRENCY_ARS, CURRENCY_USD, EXCHANGE_RATE_LABEL, EXCHANGE_RATE_QUOTE, EXCHANGE_RATE_TC};
use super::{CaptureMatcher, MatcherChain};
use crate::models::invoice::Currency;

/// Detect the invoice currency. Any dollar marker wins over peso markers,
/// since USD invoices routinely print `$` signs as well.
pub fn detect_currency(text: &str) -> Option<Currency> {
    if CURRENCY_USD.is_match(text) {
        Some(Currency::Usd)
    } else if CURRENCY_ARS.is_match(text) {
        Some(Currency::Ars)
    } else {
        None
    }
}

/// Exchange rate (tipo de cambio) labels, in priority order.
pub fn exchange_rate_chain() -> MatcherChain {
    MatcherChain::new("exchange_rate")
        .then(CaptureMatcher::new("tc", &EXCHANGE_RATE_TC))
        .then(CaptureMatcher::new("tipo_de_cambio", &EXCHANGE_RATE_LABEL))
        .then(CaptureMatcher::new("cotizacion", &EXCHANGE_RATE_QUOTE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_usd_markers() {
        assert_eq!(detect_currency("Total USD 1.000,00"), Some(Currency::Usd));
        assert_eq!(detect_currency("Total U$S 1.000,00"), Some(Currency::Usd));
        assert_eq!(detect_currency("Importe en Dólares"), Some(Currency::Usd));
    }

    #[test]
    fn test_usd_wins_over_pesos() {
        assert_eq!(detect_currency("Subtotal $ 100,00\nMoneda: USD"), Some(Currency::Usd));
    }

    #[test]
    fn test_ars_markers() {
        assert_eq!(detect_currency("Total $ 1.500,00"), Some(Currency::Ars));
        assert_eq!(detect_currency("Son Pesos un mil"), Some(Currency::Ars));
        assert_eq!(detect_currency("Sin importes"), None);
    }

    #[test]
    fn test_exchange_rate_priority() {
        let chain = exchange_rate_chain();
        assert_eq!(chain.find("TC: 850,50"), Some("850,50".to_string()));
        assert_eq!(chain.find("Tipo de cambio 912.25"), Some("912.25".to_string()));
        assert_eq!(
            chain.find("Cotización del dólar BNA 1015,00\nTC 1020,00"),
            Some("1020,00".to_string())
        );
        assert_eq!(chain.find("Cotización vigente: 1015,00"), Some("1015,00".to_string()));
        assert_eq!(chain.find("TC pendiente"), None);
    }
}

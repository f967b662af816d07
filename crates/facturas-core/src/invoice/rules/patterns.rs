//! Common regex patterns for Argentine invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CUIT patterns (Argentine tax ID)
    pub static ref CUIT_LABELED: Regex = Regex::new(
        r"(?i)C\.?U\.?I\.?T\.?(?:\s*Nro\.)?[:\s]*([0-9\-\. ]{11,16})"
    ).unwrap();

    pub static ref CUIT_BARE: Regex = Regex::new(
        r"(?i)\bCUIT\b[:\s]*([0-9\-\. ]{11,16})"
    ).unwrap();

    // Legal name (razón social)
    pub static ref LEGAL_NAME_LABEL: Regex = Regex::new(
        r"(?i)Raz[oó]n Social[:\s]*([^\n\r]+)"
    ).unwrap();

    pub static ref ISSUER_NAME_LABEL: Regex = Regex::new(
        r"(?i)Emisor[:\s]*([^\n\r]+)"
    ).unwrap();

    pub static ref COMPANY_LINE: Regex = Regex::new(
        r"(?i)\n([A-Z0-9 .&-]+ (?:S\.A\.|S\.R\.L\.|SRL\b))"
    ).unwrap();

    // Issuer scoring signals
    pub static ref COMPANY_SUFFIX: Regex = Regex::new(
        r"(?i)\b(?:C\.I\.C\.S\.A\.|S\.R\.L\.|S\.A\.|(?:CICSA|SRL|SAS|SA)\b)"
    ).unwrap();

    pub static ref CUSTOMER_ROLE: Regex = Regex::new(
        r"(?i)Cliente|Receptor|Destinatario|Señor(?:es|\(es\))"
    ).unwrap();

    pub static ref ISSUER_ROLE: Regex = Regex::new(
        r"(?i)Emisor|Proveedor"
    ).unwrap();

    // Invoice type letter, labeled variants in priority order; the nearest
    // letter after a label wins
    pub static ref TYPE_AFTER_FACTURA: Regex = Regex::new(
        r"(?i)\bFACTURA\b[\s\S]{0,120}?\b([ABCX])\b"
    ).unwrap();

    pub static ref TYPE_AFTER_COMPROBANTE: Regex = Regex::new(
        r"(?i)\bCOMPROBANTE\b[\s\S]{0,80}?\b([ABCX])\b"
    ).unwrap();

    pub static ref TYPE_AFTER_CODIGO: Regex = Regex::new(
        r"(?i)\bC[oó]digo\b[\s\S]{0,40}?\b([ABCX])\b"
    ).unwrap();

    pub static ref TYPE_BEFORE_CODIGO: Regex = Regex::new(
        r"(?i)\b([ABCX])\b[\s\S]{0,40}\bC[oó]digo\b"
    ).unwrap();

    pub static ref TYPE_BEFORE_COMPROBANTE: Regex = Regex::new(
        r"(?i)\b([ABCX])\b[\s\S]{0,40}\bComprobante\b"
    ).unwrap();

    pub static ref FACTURA_WORD: Regex = Regex::new(
        r"(?i)\bFACTURA\b"
    ).unwrap();

    pub static ref STANDALONE_TYPE_LETTER: Regex = Regex::new(
        r"\b([ABCX])\b"
    ).unwrap();

    // Invoice number (punto de venta - número)
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"\b(\d{4}-\d{8}(?:-[A-Z])?)\b"
    ).unwrap();

    pub static ref INVOICE_NUMBER_LABELED: Regex = Regex::new(
        r"(?i)\bN(?:[°º]|o\.?)\s*[:\s]*(\d{4}-\d{8}(?:-[A-Z])?)\b"
    ).unwrap();

    pub static ref INVOICE_NUMBER_FIVE_DIGIT_POS: Regex = Regex::new(
        r"\b(\d{5}-\d{8})\b"
    ).unwrap();

    // Issue date (dd/mm/yyyy or dd.mm.yyyy)
    pub static ref ISSUE_DATE_WORD: Regex = Regex::new(
        r"(?i)\bFECHA[:\s]*([0-3]?\d[/.][01]?\d[/.]\d{4})\b"
    ).unwrap();

    pub static ref ISSUE_DATE_LABEL: Regex = Regex::new(
        r"(?i)Fecha[:\s]*([0-3]?\d[/.][01]?\d[/.]\d{4})"
    ).unwrap();

    pub static ref ISSUE_DATE_EMISSION: Regex = Regex::new(
        r"(?i)Fecha\s+de\s+emisi[oó]n[:\s]*([0-3]?\d[/.][01]?\d[/.]\d{4})"
    ).unwrap();

    // Currency
    pub static ref CURRENCY_USD: Regex = Regex::new(
        r"(?i)\bUSD\b|U\$S|US\$|D[óo]lares"
    ).unwrap();

    pub static ref CURRENCY_ARS: Regex = Regex::new(
        r"(?i)\bARS\b|Pesos|AR\$|\$"
    ).unwrap();

    // Exchange rate (tipo de cambio)
    pub static ref EXCHANGE_RATE_TC: Regex = Regex::new(
        r"(?i)\bTC\b[:\s]*([0-9]+[.,][0-9]+)"
    ).unwrap();

    pub static ref EXCHANGE_RATE_LABEL: Regex = Regex::new(
        r"(?i)Tipo de cambio[:\s]*([0-9]+[.,][0-9]+)"
    ).unwrap();

    pub static ref EXCHANGE_RATE_QUOTE: Regex = Regex::new(
        r"(?i)Cotizaci[oó]n.*?([0-9]+[.,][0-9]+)"
    ).unwrap();

    // Tax authorization codes
    pub static ref CAE_UNASSIGNED: Regex = Regex::new(
        r"(?i)C\.?A\.?E\.?.*SIN ASIGNAR"
    ).unwrap();

    // A trailing dot is optional on every label; CAE must not be the start
    // of a CAEA label
    pub static ref CAE: Regex = Regex::new(
        r"(?i)\bC\.?A\.?E\b\.?(?:[^A-Za-z0-9.]|$).*?([0-9]{8,14})"
    ).unwrap();

    pub static ref CAI: Regex = Regex::new(
        r"(?i)\bC\.?A\.?I\b\.?[:\s]*([0-9]{8,14})"
    ).unwrap();

    pub static ref CAEA: Regex = Regex::new(
        r"(?i)\bC\.?A\.?E\.?A\b\.?[:\s]*([0-9]{8,14})"
    ).unwrap();

    // Tax (IVA) and withholding amounts
    pub static ref IVA_LINE: Regex = Regex::new(
        r"(?i)\bIVA\b([^\n\r]*)"
    ).unwrap();

    pub static ref IVA_MENTION: Regex = Regex::new(
        r"(?i)\bIVA\b|\bI\.V\.A\."
    ).unwrap();

    pub static ref WITHHOLDING_LINE: Regex = Regex::new(
        r"(?i)Retenci(?:ones|[oó]n)([^\n\r]*)"
    ).unwrap();

    pub static ref WITHHOLDING_MENTION: Regex = Regex::new(
        r"(?i)Percepci[oó]n|IIBB|IBP|IBCF|Retenci[oó]n"
    ).unwrap();

    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"\$?\s*\d[\d.,]*[.,]\d{2}\b"
    ).unwrap();

    // Line items
    pub static ref LINE_ITEMS_LABEL: Regex = Regex::new(
        r"(?i)Detalle|Descripci[oó]n|Concepto"
    ).unwrap();

    pub static ref LINE_AMOUNT: Regex = Regex::new(
        r"[0-9]+[.,][0-9]{2}"
    ).unwrap();

    pub static ref QUANTITY_COLUMN: Regex = Regex::new(
        r"(?i)\bCant\.?\b|\bCantidad\b"
    ).unwrap();

    pub static ref UNIT_PRICE_COLUMN: Regex = Regex::new(
        r"(?i)Unit\.?|Unitario|P\.?\s*Unit"
    ).unwrap();
}

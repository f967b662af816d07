//! Invoice record produced by the extraction engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::invoice::classifier::{classify, Classification};

/// Placeholder stored when a field was detected but its value is not extracted.
pub const SEE_SOURCE: &str = "VER_EN_PDF";

/// Column headers of the row-based report, in output order.
pub const REPORT_HEADERS: [&str; 17] = [
    "Legal name",
    "CUIT",
    "Invoice type",
    "Invoice number",
    "Issue date",
    "Currency",
    "Exchange rate",
    "Authorization kind",
    "Authorization value",
    "Line items",
    "Quantity",
    "Unit price",
    "Withholding",
    "Tax amount",
    "Status",
    "Issues",
    "File",
];

/// Overall extraction status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Every required field was found and no rule flagged the document.
    Ok,
    /// Something is missing or suspicious; a person should look at it.
    NeedsReview,
    /// Too little was extracted to trust the record, or no text at all.
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::NeedsReview => "NEEDS_REVIEW",
            Status::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice class letter printed on Argentine invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceType {
    A,
    B,
    C,
    X,
}

impl InvoiceType {
    /// Parse a type letter, case-insensitively.
    pub fn from_letter(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Some(InvoiceType::A),
            "B" => Some(InvoiceType::B),
            "C" => Some(InvoiceType::C),
            "X" => Some(InvoiceType::X),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceType::A => "A",
            InvoiceType::B => "B",
            InvoiceType::C => "C",
            InvoiceType::X => "X",
        }
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invoice currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Ars,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Ars => "ARS",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of tax authorization code printed on the invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthorizationKind {
    /// Código de Autorización Electrónico.
    Cae,
    /// Código de Autorización de Impresión.
    Cai,
    /// CAE anticipado.
    Caea,
}

impl AuthorizationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationKind::Cae => "CAE",
            AuthorizationKind::Cai => "CAI",
            AuthorizationKind::Caea => "CAEA",
        }
    }
}

impl fmt::Display for AuthorizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected tax authorization code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxAuthorization {
    pub kind: AuthorizationKind,
    /// `None` when the code is printed as not yet assigned.
    pub value: Option<String>,
}

impl TaxAuthorization {
    pub fn new(kind: AuthorizationKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: Some(value.into()),
        }
    }

    /// A CAE label printed together with "SIN ASIGNAR".
    pub fn unassigned_cae() -> Self {
        Self {
            kind: AuthorizationKind::Cae,
            value: None,
        }
    }

    pub fn is_unassigned(&self) -> bool {
        self.value.is_none()
    }
}

/// Every field the extractor looks for, before classification.
///
/// Each extraction step fills one field; nothing here is revised later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub legal_name: Option<String>,
    pub tax_id: Option<String>,
    pub invoice_type: Option<InvoiceType>,
    pub invoice_number: Option<String>,
    pub issue_date: Option<String>,
    pub currency: Option<Currency>,
    pub exchange_rate: Option<String>,
    pub authorization: Option<TaxAuthorization>,
    pub line_items: Option<String>,
    pub quantity: Option<String>,
    pub unit_price: Option<String>,
    pub withholding: Option<String>,
    pub tax_amount: Option<String>,
}

/// Structured result for one source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,

    /// Normalized CUIT (`DD-DDDDDDDD-D` when it has 11 digits).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_type: Option<InvoiceType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Issue date as printed, with separators normalized to `/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_kind: Option<AuthorizationKind>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_value: Option<String>,

    /// Raw line-item block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_items: Option<String>,

    /// [`SEE_SOURCE`] when a quantity column was detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,

    /// [`SEE_SOURCE`] when a unit price column was detected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub withholding: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<String>,

    status: Status,

    #[serde(default)]
    issues: Vec<String>,

    pub file_name: String,
}

impl InvoiceRecord {
    /// Build a record from extracted fields, deriving status and issues.
    pub fn new(fields: ExtractedFields, file_name: impl Into<String>) -> Self {
        let Classification { status, issues } = classify(&fields);
        let (authorization_kind, authorization_value) = match fields.authorization {
            Some(auth) => (Some(auth.kind), auth.value),
            None => (None, None),
        };

        Self {
            legal_name: fields.legal_name,
            tax_id: fields.tax_id,
            invoice_type: fields.invoice_type,
            invoice_number: fields.invoice_number,
            issue_date: fields.issue_date,
            currency: fields.currency,
            exchange_rate: fields.exchange_rate,
            authorization_kind,
            authorization_value,
            line_items: fields.line_items,
            quantity: fields.quantity,
            unit_price: fields.unit_price,
            withholding: fields.withholding,
            tax_amount: fields.tax_amount,
            status,
            issues,
            file_name: file_name.into(),
        }
    }

    /// Terminal record for a document whose text could not be obtained.
    pub fn failed(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            legal_name: None,
            tax_id: None,
            invoice_type: None,
            invoice_number: None,
            issue_date: None,
            currency: None,
            exchange_rate: None,
            authorization_kind: None,
            authorization_value: None,
            line_items: None,
            quantity: None,
            unit_price: None,
            withholding: None,
            tax_amount: None,
            status: Status::Error,
            issues: vec![message.into()],
            file_name: file_name.into(),
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    /// The record as one report row, in [`REPORT_HEADERS`] order.
    pub fn report_row(&self) -> [String; 17] {
        fn text(v: &Option<String>) -> String {
            v.clone().unwrap_or_default()
        }
        fn shown<T: fmt::Display>(v: &Option<T>) -> String {
            v.as_ref().map(|x| x.to_string()).unwrap_or_default()
        }

        [
            text(&self.legal_name),
            text(&self.tax_id),
            shown(&self.invoice_type),
            text(&self.invoice_number),
            text(&self.issue_date),
            shown(&self.currency),
            text(&self.exchange_rate),
            shown(&self.authorization_kind),
            text(&self.authorization_value),
            text(&self.line_items),
            text(&self.quantity),
            text(&self.unit_price),
            text(&self.withholding),
            text(&self.tax_amount),
            self.status.to_string(),
            self.issues.join(" | "),
            self.file_name.clone(),
        ]
    }
}

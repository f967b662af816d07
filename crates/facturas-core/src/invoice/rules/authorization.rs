//! Tax authorization codes (CAE, CAI, CAEA).

use tracing::debug;

use super::patterns::{CAE, CAEA, CAE_UNASSIGNED, CAI};
use super::{CaptureMatcher, FieldMatcher};
use crate::models::invoice::{AuthorizationKind, TaxAuthorization};

/// Detect the authorization printed on the invoice.
///
/// A CAE marked `SIN ASIGNAR` takes precedence over everything else and
/// yields a CAE without value. Otherwise CAE, CAI and CAEA are tried in that
/// order, each requiring an 8 to 14 digit code.
pub fn detect_authorization(text: &str) -> Option<TaxAuthorization> {
    if CAE_UNASSIGNED.is_match(text) {
        debug!("CAE label marked as unassigned");
        return Some(TaxAuthorization::unassigned_cae());
    }

    let kinds = [
        (AuthorizationKind::Cae, CaptureMatcher::new("cae", &CAE)),
        (AuthorizationKind::Cai, CaptureMatcher::new("cai", &CAI)),
        (AuthorizationKind::Caea, CaptureMatcher::new("caea", &CAEA)),
    ];

    kinds.into_iter().find_map(|(kind, matcher)| {
        let value = matcher.find(text)?;
        debug!("{} authorization {}", kind, value);
        Some(TaxAuthorization::new(kind, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cae_with_value() {
        let auth = detect_authorization("C.A.E. N°: 71234567890123\nVto. CAE: 10/04/2024").unwrap();
        assert_eq!(auth.kind, AuthorizationKind::Cae);
        assert_eq!(auth.value.as_deref(), Some("71234567890123"));
    }

    #[test]
    fn test_unassigned_cae_wins() {
        let text = "CAE: SIN ASIGNAR\nCAI: 12345678901234";
        let auth = detect_authorization(text).unwrap();
        assert_eq!(auth, TaxAuthorization::unassigned_cae());
        assert!(auth.is_unassigned());
    }

    #[test]
    fn test_cai_and_caea() {
        let cai = detect_authorization("C.A.I.: 45123456789012").unwrap();
        assert_eq!(cai.kind, AuthorizationKind::Cai);
        assert_eq!(cai.value.as_deref(), Some("45123456789012"));

        let caea = detect_authorization("CAEA 31234567890123").unwrap();
        assert_eq!(caea.kind, AuthorizationKind::Caea);
        assert_eq!(caea.value.as_deref(), Some("31234567890123"));
    }

    #[test]
    fn test_dotted_labels() {
        for text in ["C.A.I. 45123456789012", "C.A.I.: 45123456789012", "c.a.i 45123456789012"] {
            let auth = detect_authorization(text).unwrap();
            assert_eq!(auth.kind, AuthorizationKind::Cai, "{text}");
            assert_eq!(auth.value.as_deref(), Some("45123456789012"));
        }

        let caea = detect_authorization("C.A.E.A. 31234567890123").unwrap();
        assert_eq!(caea.kind, AuthorizationKind::Caea);
        assert_eq!(caea.value.as_deref(), Some("31234567890123"));

        let caea = detect_authorization("C.A.E.A.: 31234567890123").unwrap();
        assert_eq!(caea.kind, AuthorizationKind::Caea);
    }

    #[test]
    fn test_cae_label_variants() {
        for text in ["CAE: 71234567890123", "C.A.E.: 71234567890123", "CAE N° 71234567890123"] {
            let auth = detect_authorization(text).unwrap();
            assert_eq!(auth.kind, AuthorizationKind::Cae, "{text}");
            assert_eq!(auth.value.as_deref(), Some("71234567890123"));
        }
    }

    #[test]
    fn test_short_codes_are_ignored() {
        assert_eq!(detect_authorization("CAI: 1234567"), None);
        assert_eq!(detect_authorization("Factura sin autorizacion"), None);
    }
}

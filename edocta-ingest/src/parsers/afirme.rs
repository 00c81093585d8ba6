//! Afirme statement parser.
//!
//! Header-driven CSV; the first line carries localized column labels:
//!   Descripcion,Fecha,Referencia,Cargos,Abonos,Saldo,Cuenta
//!   PAGO TARJETA,01/03/24,REF123,0,500.00,1500.00,ACC001
//! Label spelling drifts with the export encoding ("Descripción",
//! "DescripciÃ³n"), so all variants map to the same canonical name.

use edocta_core::{BankIdentity, DateFormat, ParseReporter};

use crate::document::Document;
use crate::mine::{SpeiGrammar, extract_spei};
use crate::mined::MinedFields;
use crate::parsers::{BankParser, tokenize_headered_csv};
use crate::row::{RawRow, col};

pub const IDENTITY: BankIdentity = BankIdentity { id: "afirme", routing: "062", name: "Afirme" };

const SPEI_RECEIVED: SpeiGrammar = SpeiGrammar {
    detect: "SPEI RECIBIDO",
    counterparty: "DE:",
    tracking: "CVE RAST:",
    time: "HR LIQ:",
    concept: "CONCEPTO:",
};

const SPEI_SENT: SpeiGrammar = SpeiGrammar {
    detect: "SPEI ENVIADO",
    counterparty: "BENEF:",
    tracking: "CVE RASTREO:",
    time: "HORA LIQ:",
    concept: "CONCEPTO:",
};

fn canonical(label: &str) -> Option<&'static str> {
    match label.trim().to_lowercase().as_str() {
        "descripcion" | "descripción" | "descripciã³n" => Some(col::DESCRIPTION),
        "fecha" => Some(col::DATE),
        "referencia" => Some(col::REFERENCE),
        "cargo" | "cargos" => Some(col::DEBIT),
        "abono" | "abonos" => Some(col::CREDIT),
        "saldo" => Some(col::BALANCE),
        "cuenta" => Some(col::ACCOUNT),
        _ => None,
    }
}

pub struct Afirme;

impl BankParser for Afirme {
    fn identity(&self) -> BankIdentity {
        IDENTITY
    }

    fn date_format(&self) -> DateFormat {
        DateFormat::DayMonthYear2
    }

    fn tokenize(&self, doc: &Document, reporter: &dyn ParseReporter) -> Vec<RawRow> {
        let Some(text) = doc.as_text() else { return Vec::new() };
        tokenize_headered_csv(text, canonical, IDENTITY.id, reporter)
    }

    fn mine(&self, description: &str) -> MinedFields {
        extract_spei(description, &SPEI_RECEIVED)
            .or_else(|| extract_spei(description, &SPEI_SENT))
            .unwrap_or_else(|| MinedFields::unmatched(description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edocta_core::{NoopReporter, TxnKind};

    #[test]
    fn test_parses_headered_export() {
        let text = "\
Descripcion,Fecha,Referencia,Cargos,Abonos,Saldo,Cuenta
PAGO TARJETA,01/03/24,REF123,0,500.00,1500.00,ACC001
RETIRO CAJERO,02/03/24,REF124,200.00,0,1300.00,ACC001
";
        let txns = Afirme.parse(&Document::Text(text), &NoopReporter);
        assert_eq!(txns.len(), 2);

        let first = &txns[0];
        assert_eq!(first.date, "2024-03-01");
        assert_eq!(first.kind, TxnKind::Credit);
        assert_eq!(first.amount, 500.0);
        assert_eq!(first.balance, 1500.0);
        assert_eq!(first.reference, "REF123");
        assert_eq!(first.account_number.as_deref(), Some("ACC001"));
        assert_eq!(first.description, "PAGO TARJETA");

        assert_eq!(txns[1].kind, TxnKind::Debit);
        assert_eq!(txns[1].amount, -200.0);
    }

    #[test]
    fn test_misencoded_header_label_still_maps() {
        let text = "\
DescripciÃ³n,Fecha,Cargos,Abonos,Saldo
ABONO NOMINA,05/03/24,0,1000.00,2300.00
";
        let txns = Afirme.parse(&Document::Text(text), &NoopReporter);
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].description, "ABONO NOMINA");
        assert_eq!(txns[0].amount, 1000.0);
    }

    #[test]
    fn test_spei_received_description_is_mined() {
        let text = "\
Descripcion,Fecha,Referencia,Cargos,Abonos,Saldo
SPEI RECIBIDO DE: ACME SA DE CV CVE RAST: 2024AFIR01000123 HR LIQ: 13:45:02 CONCEPTO: PAGO FACTURA 881,05/03/24,REF1,0,\"12,000.00\",\"15,000.00\"
";
        let txns = Afirme.parse(&Document::Text(text), &NoopReporter);
        assert_eq!(txns.len(), 1);
        let txn = &txns[0];
        assert_eq!(txn.beneficiary.as_deref(), Some("ACME SA DE CV"));
        assert_eq!(txn.tracking_key.as_deref(), Some("2024AFIR01000123"));
        assert_eq!(txn.time.as_deref(), Some("13:45:02"));
        assert_eq!(txn.description, "PAGO FACTURA 881 ACME SA DE CV");
        assert_eq!(txn.amount, 12000.0);
    }

    #[test]
    fn test_trailing_footer_row_is_dropped() {
        let text = "\
Descripcion,Fecha,Cargos,Abonos,Saldo
PAGO TARJETA,01/03/24,0,500.00,1500.00
,,,,\n";
        let txns = Afirme.parse(&Document::Text(text), &NoopReporter);
        assert_eq!(txns.len(), 1);
    }
}

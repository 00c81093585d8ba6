//! Banorte statement parser.
//!
//! Header-driven CSV with Banorte's own label set:
//!   Fecha De Operación,Descripción,Referencia,Retiros,Depositos,Saldo
//! SPEI descriptions carry the standard labeled sub-segments; plain
//! transfers use the parenthesized `(BE)`/`(NB)` markers.

use edocta_core::{BankIdentity, DateFormat, ParseReporter};

use crate::document::Document;
use crate::mine::{SpeiGrammar, extract_spei, extract_transfer_marker};
use crate::mined::MinedFields;
use crate::parsers::{BankParser, tokenize_headered_csv};
use crate::row::{RawRow, col};

pub const IDENTITY: BankIdentity = BankIdentity { id: "banorte", routing: "072", name: "Banorte" };

const SPEI_RECEIVED: SpeiGrammar = SpeiGrammar {
    detect: "SPEI RECIBIDO",
    counterparty: "DE:",
    tracking: "CVE RASTREO:",
    time: "HORA LIQ:",
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
        "fecha" | "fecha de operacion" | "fecha de operación" | "fecha de operaciã³n" => {
            Some(col::DATE)
        }
        "descripcion" | "descripción" | "descripciã³n" | "concepto" => Some(col::DESCRIPTION),
        "referencia" | "movimiento" => Some(col::REFERENCE),
        "retiros" | "cargo" | "cargos" => Some(col::DEBIT),
        "depositos" | "depósitos" | "abono" | "abonos" => Some(col::CREDIT),
        "saldo" => Some(col::BALANCE),
        "cuenta" => Some(col::ACCOUNT),
        _ => None,
    }
}

pub struct Banorte;

impl BankParser for Banorte {
    fn identity(&self) -> BankIdentity {
        IDENTITY
    }

    fn date_format(&self) -> DateFormat {
        DateFormat::DayMonthYear4
    }

    fn tokenize(&self, doc: &Document, reporter: &dyn ParseReporter) -> Vec<RawRow> {
        let Some(text) = doc.as_text() else { return Vec::new() };
        tokenize_headered_csv(text, canonical, IDENTITY.id, reporter)
    }

    fn mine(&self, description: &str) -> MinedFields {
        extract_spei(description, &SPEI_RECEIVED)
            .or_else(|| extract_spei(description, &SPEI_SENT))
            .or_else(|| extract_transfer_marker(description))
            .unwrap_or_else(|| MinedFields::unmatched(description))
    }
}

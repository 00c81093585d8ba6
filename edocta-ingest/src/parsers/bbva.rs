//! BBVA statement parser.
//!
//! Tab-delimited export; the first line is a localized header row:
//!   FECHA\tCONCEPTO\tREFERENCIA\tCARGO\tABONO\tSALDO
//! SPEI descriptions label the counterparty ORDENANTE/BENEFICIARIO and
//! the tracking key CLAVE DE RASTREO.

use edocta_core::{BankIdentity, DateFormat, ParseEvent, ParseReporter};

use crate::document::Document;
use crate::mine::{SpeiGrammar, extract_spei};
use crate::mined::MinedFields;
use crate::parsers::BankParser;
use crate::row::{RawRow, col};
use crate::split::split_delimited;

pub const IDENTITY: BankIdentity = BankIdentity { id: "bbva", routing: "012", name: "BBVA México" };

const SPEI_RECEIVED: SpeiGrammar = SpeiGrammar {
    detect: "SPEI RECIBIDO",
    counterparty: "ORDENANTE:",
    tracking: "CLAVE DE RASTREO:",
    time: "HORA:",
    concept: "CONCEPTO:",
};

const SPEI_SENT: SpeiGrammar = SpeiGrammar {
    detect: "SPEI ENVIADO",
    counterparty: "BENEFICIARIO:",
    tracking: "CLAVE DE RASTREO:",
    time: "HORA:",
    concept: "CONCEPTO:",
};

fn canonical(label: &str) -> Option<&'static str> {
    match label.trim().to_lowercase().as_str() {
        "fecha" => Some(col::DATE),
        "concepto" | "descripcion" | "descripción" | "descripciã³n" => Some(col::DESCRIPTION),
        "referencia" => Some(col::REFERENCE),
        "cargo" | "cargos" => Some(col::DEBIT),
        "abono" | "abonos" => Some(col::CREDIT),
        "saldo" => Some(col::BALANCE),
        "cuenta" => Some(col::ACCOUNT),
        _ => None,
    }
}

pub struct Bbva;

impl BankParser for Bbva {
    fn identity(&self) -> BankIdentity {
        IDENTITY
    }

    fn date_format(&self) -> DateFormat {
        DateFormat::DayMonthYear4
    }

    fn tokenize(&self, doc: &Document, reporter: &dyn ParseReporter) -> Vec<RawRow> {
        let Some(text) = doc.as_text() else { return Vec::new() };

        let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());
        let Some((_, header_line)) = lines.next() else {
            reporter.report(ParseEvent::HeaderNotFound { bank: IDENTITY.id });
            return Vec::new();
        };
        if !header_line.contains('\t') {
            reporter.report(ParseEvent::HeaderNotFound { bank: IDENTITY.id });
            return Vec::new();
        }

        let columns: Vec<String> = split_delimited(header_line, '\t')
            .iter()
            .map(|label| {
                canonical(label)
                    .map(str::to_string)
                    .unwrap_or_else(|| label.trim().to_string())
            })
            .collect();

        let mut rows = Vec::new();
        for (idx, line) in lines {
            if !line.contains('\t') {
                continue;
            }
            let fields = split_delimited(line, '\t');
            let mut row = RawRow::new(idx + 1);
            for (name, value) in columns.iter().zip(fields.iter()) {
                row.set(name, value);
            }
            rows.push(row);
        }
        rows
    }

    fn mine(&self, description: &str) -> MinedFields {
        extract_spei(description, &SPEI_RECEIVED)
            .or_else(|| extract_spei(description, &SPEI_SENT))
            .unwrap_or_else(|| MinedFields::unmatched(description))
    }
}

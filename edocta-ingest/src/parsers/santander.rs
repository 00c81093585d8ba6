//! Santander statement parser.
//!
//! Quoted-token export; a transaction row starts with an 8-digit quoted
//! date token (DDMMYYYY), mixing single-quoted and bare comma-separated
//! tokens:
//!   '01032024','TRANSFERENCIA ELECTRONICA','8800451',0.00,'1,500.00','22,500.00'
//! The data section ends at the first non-matching line after rows have
//! started; everything below is statement footer.

use edocta_core::{BankIdentity, DateFormat, ParseEvent, ParseReporter};

use crate::document::Document;
use crate::mine::{find_embedded_date, find_rfc, find_time, labeled_segment};
use crate::mined::MinedFields;
use crate::parsers::BankParser;
use crate::row::{RawRow, col};
use crate::split::split_delimited;

pub const IDENTITY: BankIdentity = BankIdentity { id: "santander", routing: "014", name: "Santander" };

const COLUMNS: [&str; 6] = [
    col::DATE,
    col::DESCRIPTION,
    col::REFERENCE,
    col::DEBIT,
    col::CREDIT,
    col::BALANCE,
];

fn is_compact_date(token: &str) -> bool {
    token.len() == 8 && token.bytes().all(|b| b.is_ascii_digit())
}

pub struct Santander;

impl BankParser for Santander {
    fn identity(&self) -> BankIdentity {
        IDENTITY
    }

    fn date_format(&self) -> DateFormat {
        DateFormat::Compact
    }

    fn tokenize(&self, doc: &Document, reporter: &dyn ParseReporter) -> Vec<RawRow> {
        let Some(text) = doc.as_text() else { return Vec::new() };

        let mut rows = Vec::new();
        let mut in_section = false;
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() && !in_section {
                continue;
            }
            let fields = split_delimited(trimmed, ',');
            let matches = fields.len() >= COLUMNS.len() && is_compact_date(fields[0].trim());

            if !matches {
                if in_section {
                    // First non-matching line after the data block: footer.
                    break;
                }
                continue;
            }

            in_section = true;
            let mut row = RawRow::new(idx + 1);
            for (name, value) in COLUMNS.iter().zip(fields.iter()) {
                row.set(name, value);
            }
            rows.push(row);
        }

        if rows.is_empty() {
            reporter.report(ParseEvent::HeaderNotFound { bank: IDENTITY.id });
        }
        rows
    }

    fn mine(&self, description: &str) -> MinedFields {
        mine_transferencia(description).unwrap_or_else(|| MinedFields::unmatched(description))
    }
}

/// `TRANSFERENCIA ELECTRONICA ... BENEFICIARIO ... CLAVE DE RASTREO ...`
///
/// Santander spells the labels without colons and often embeds the
/// operation date, which differs from the posting date.
fn mine_transferencia(description: &str) -> Option<MinedFields> {
    if !description.contains("TRANSFERENCIA ELECTRONICA") {
        return None;
    }
    let stops = ["BENEFICIARIO", "CLAVE DE RASTREO", "CONCEPTO", "RFC", "FECHA"];

    let beneficiary = labeled_segment(description, "BENEFICIARIO", &stops);
    let tracking_key = labeled_segment(description, "CLAVE DE RASTREO", &stops)
        .map(|v| v.split_whitespace().next().unwrap_or(&v).to_string());
    let concept = labeled_segment(description, "CONCEPTO", &stops);
    // Operation date only when the FECHA label anchors it; a bare date
    // elsewhere in the text is not trusted.
    let transaction_date = labeled_segment(description, "FECHA", &stops)
        .and_then(|v| find_embedded_date(&v));

    let actual_description = match (&concept, &beneficiary) {
        (Some(c), Some(b)) => Some(format!("{c} {b}")),
        (Some(c), None) => Some(c.clone()),
        (None, Some(b)) => Some(format!("Transferencia electronica {b}")),
        (None, None) => Some("Transferencia electronica".to_string()),
    };

    Some(MinedFields {
        beneficiary,
        tracking_key,
        rfc: find_rfc(description),
        concept,
        time: find_time(description),
        transaction_date,
        actual_description,
    })
}

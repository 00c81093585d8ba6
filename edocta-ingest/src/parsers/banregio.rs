//! Banregio statement parser.
//!
//! Delimited export with a literal header marker somewhere in the metadata
//! prefix; the data block starts on the next line:
//!   ...account metadata...
//!   Fecha,Descripción,Referencia,Cargo,Abonos,Saldo,Clasificación
//!   01/03/2024,"TRASPASO A CUENTA PROPIA",123,0,"1,000.00","5,000.00",Traspasos
//! Two format revisions circulate; the older one lacks the trailing
//! Clasificación column. The revision is explicit, never guessed.

use edocta_core::{BankIdentity, DateFormat, ParseEvent, ParseReporter, SkipReason};

use crate::document::Document;
use crate::mine::{SpeiGrammar, extract_spei, extract_transfer_marker, find_rfc};
use crate::mined::MinedFields;
use crate::parsers::BankParser;
use crate::row::{RawRow, col};
use crate::split::split_delimited;

pub const IDENTITY: BankIdentity = BankIdentity { id: "banregio", routing: "058", name: "Banregio" };

/// Lines checked for the header marker before concluding it is absent.
const MARKER_SCAN_LINES: usize = 30;

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

/// Statement format revisions observed in the wild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BanregioRevision {
    /// Seven columns, trailing Clasificación.
    Current,
    /// Six columns, no classification.
    Legacy,
}

impl BanregioRevision {
    fn header_marker(self) -> &'static str {
        match self {
            BanregioRevision::Current => {
                "Fecha,Descripción,Referencia,Cargo,Abonos,Saldo,Clasificación"
            }
            BanregioRevision::Legacy => "Fecha,Descripción,Referencia,Cargo,Abonos,Saldo",
        }
    }

    fn columns(self) -> &'static [&'static str] {
        match self {
            BanregioRevision::Current => &[
                col::DATE,
                col::DESCRIPTION,
                col::REFERENCE,
                col::DEBIT,
                col::CREDIT,
                col::BALANCE,
                col::CATEGORY,
            ],
            BanregioRevision::Legacy => &[
                col::DATE,
                col::DESCRIPTION,
                col::REFERENCE,
                col::DEBIT,
                col::CREDIT,
                col::BALANCE,
            ],
        }
    }
}

pub struct Banregio {
    revision: BanregioRevision,
}

impl Banregio {
    pub const fn new(revision: BanregioRevision) -> Self {
        Self { revision }
    }
}

fn is_summary_line(line: &str) -> bool {
    let upper = line.to_uppercase();
    upper.starts_with("SALDO INICIAL") || upper.starts_with("SALDO FINAL")
}

impl BankParser for Banregio {
    fn identity(&self) -> BankIdentity {
        IDENTITY
    }

    fn date_format(&self) -> DateFormat {
        DateFormat::DayMonthYear4
    }

    fn tokenize(&self, doc: &Document, reporter: &dyn ParseReporter) -> Vec<RawRow> {
        let Some(text) = doc.as_text() else { return Vec::new() };
        let marker = self.revision.header_marker();
        let columns = self.revision.columns();

        let mut data_start = None;
        for (idx, line) in text.lines().take(MARKER_SCAN_LINES).enumerate() {
            if line.trim() == marker {
                data_start = Some(idx + 1);
                break;
            }
        }
        let Some(data_start) = data_start else {
            reporter.report(ParseEvent::HeaderNotFound { bank: IDENTITY.id });
            return Vec::new();
        };

        let mut rows = Vec::new();
        for (idx, line) in text.lines().enumerate().skip(data_start) {
            let trimmed = line.trim();
            if trimmed.is_empty() || is_summary_line(trimmed) || !trimmed.contains(',') {
                continue;
            }
            let fields = split_delimited(trimmed, ',');
            if fields.len() < columns.len() {
                reporter.report(ParseEvent::RowSkipped {
                    bank: IDENTITY.id,
                    line: idx + 1,
                    reason: SkipReason::TooFewColumns,
                });
                continue;
            }
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
            .or_else(|| extract_transfer_marker(description))
            .or_else(|| mine_traspaso(description))
            .unwrap_or_else(|| MinedFields::unmatched(description))
    }
}

/// `TRASPASO A CUENTA 012345 NOMINA EMPRESA SA` style internal transfers.
fn mine_traspaso(description: &str) -> Option<MinedFields> {
    let rest = description.trim().strip_prefix("TRASPASO A CUENTA ")?;
    let (account, beneficiary) = rest.split_once(' ').unwrap_or((rest, ""));
    if !account.bytes().all(|b| b.is_ascii_digit()) || account.is_empty() {
        return None;
    }
    let beneficiary = beneficiary.trim();
    Some(MinedFields {
        beneficiary: (!beneficiary.is_empty()).then(|| beneficiary.to_string()),
        rfc: find_rfc(description),
        actual_description: Some(format!("Traspaso {account} {beneficiary}").trim().to_string()),
        ..MinedFields::default()
    })
}

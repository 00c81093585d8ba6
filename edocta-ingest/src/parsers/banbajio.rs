//! BanBajío statement parser.
//!
//! Pipe-delimited export in two revisions:
//!
//! `Headered` — a literal marker line opens the data block:
//!   FECHA|DESCRIPCION|REFERENCIA|CARGOS|ABONOS|SALDO
//!   05-Ene-2024|DEPOSITO EFECTIVO|9001|0|1,500.00|8,200.00
//!
//! `Positional` — no header at all; transaction lines are recognized by a
//! leading DD-MMM-YYYY token and columns are addressed by numeric index.
//! The source lists newest-first, so output is reversed to restore
//! chronological order.

use edocta_core::{BankIdentity, DateFormat, ParseEvent, ParseReporter, SkipReason};

use crate::document::Document;
use crate::mine::{extract_transfer_marker, find_rfc};
use crate::mined::MinedFields;
use crate::parsers::BankParser;
use crate::row::{RawRow, col};
use crate::split::split_delimited;

pub const IDENTITY: BankIdentity = BankIdentity { id: "banbajio", routing: "030", name: "BanBajío" };

const HEADER_MARKER: &str = "FECHA|DESCRIPCION|REFERENCIA|CARGOS|ABONOS|SALDO";
const MARKER_SCAN_LINES: usize = 30;

const COLUMNS: [&str; 6] = [
    col::DATE,
    col::DESCRIPTION,
    col::REFERENCE,
    col::DEBIT,
    col::CREDIT,
    col::BALANCE,
];

/// Statement format revisions; selected explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BajioRevision {
    Headered,
    /// Headerless, numeric-index columns, newest-first source order.
    Positional,
}

pub struct BanBajio {
    revision: BajioRevision,
}

impl BanBajio {
    pub const fn new(revision: BajioRevision) -> Self {
        Self { revision }
    }
}

/// `05-Ene-2024` shaped token: the row detector for the positional revision.
fn looks_like_abbr_date(token: &str) -> bool {
    let parts: Vec<&str> = token.trim().split('-').collect();
    parts.len() == 3
        && parts[0].len() == 2
        && parts[0].bytes().all(|b| b.is_ascii_digit())
        && parts[1].len() == 3
        && parts[2].len() == 4
        && parts[2].bytes().all(|b| b.is_ascii_digit())
}

fn is_summary_line(line: &str) -> bool {
    let upper = line.to_uppercase();
    upper.starts_with("SALDO ANTERIOR") || upper.starts_with("SALDO FINAL")
}

fn map_fields(fields: &[String], line: usize) -> RawRow {
    let mut row = RawRow::new(line);
    for (name, value) in COLUMNS.iter().zip(fields.iter()) {
        row.set(name, value);
    }
    row
}

impl BankParser for BanBajio {
    fn identity(&self) -> BankIdentity {
        IDENTITY
    }

    fn date_format(&self) -> DateFormat {
        DateFormat::DayMonthAbbrYear
    }

    fn tokenize(&self, doc: &Document, reporter: &dyn ParseReporter) -> Vec<RawRow> {
        let Some(text) = doc.as_text() else { return Vec::new() };
        match self.revision {
            BajioRevision::Headered => tokenize_headered(text, reporter),
            BajioRevision::Positional => tokenize_positional(text, reporter),
        }
    }

    fn mine(&self, description: &str) -> MinedFields {
        extract_transfer_marker(description)
            .or_else(|| mine_rfc_only(description))
            .unwrap_or_else(|| MinedFields::unmatched(description))
    }
}

fn tokenize_headered(text: &str, reporter: &dyn ParseReporter) -> Vec<RawRow> {
    let mut data_start = None;
    for (idx, line) in text.lines().take(MARKER_SCAN_LINES).enumerate() {
        if line.trim() == HEADER_MARKER {
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
        if trimmed.is_empty() || is_summary_line(trimmed) || !trimmed.contains('|') {
            continue;
        }
        let fields = split_delimited(trimmed, '|');
        if fields.len() < COLUMNS.len() {
            reporter.report(ParseEvent::RowSkipped {
                bank: IDENTITY.id,
                line: idx + 1,
                reason: SkipReason::TooFewColumns,
            });
            continue;
        }
        rows.push(map_fields(&fields, idx + 1));
    }
    rows
}

fn tokenize_positional(text: &str, reporter: &dyn ParseReporter) -> Vec<RawRow> {
    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || !trimmed.contains('|') {
            continue;
        }
        let fields = split_delimited(trimmed, '|');
        if !looks_like_abbr_date(&fields[0]) {
            continue;
        }
        if fields.len() < COLUMNS.len() {
            reporter.report(ParseEvent::RowSkipped {
                bank: IDENTITY.id,
                line: idx + 1,
                reason: SkipReason::TooFewColumns,
            });
            continue;
        }
        rows.push(map_fields(&fields, idx + 1));
    }
    // Source order is newest-first in this revision.
    rows.reverse();
    rows
}

fn mine_rfc_only(description: &str) -> Option<MinedFields> {
    let rfc = find_rfc(description)?;
    Some(MinedFields {
        rfc: Some(rfc),
        actual_description: Some(description.trim().to_string()),
        ..MinedFields::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use edocta_core::{CollectingReporter, NoopReporter};

    #[test]
    fn test_headered_revision() {
        let text = "\
BANCO DEL BAJIO SA
CUENTA: 030987654321
FECHA|DESCRIPCION|REFERENCIA|CARGOS|ABONOS|SALDO
SALDO ANTERIOR|||||6,700.00
05-Ene-2024|DEPOSITO EFECTIVO|9001|0|1,500.00|8,200.00
08-Ene-2024|PAGO PROVEEDOR RFC PNO040302AB1|9002|2,000.00|0|6,200.00
";
        let parser = BanBajio::new(BajioRevision::Headered);
        let txns = parser.parse(&Document::Text(text), &NoopReporter);
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].date, "2024-01-05");
        assert_eq!(txns[0].amount, 1500.0);
        assert_eq!(txns[1].amount, -2000.0);
        assert_eq!(txns[1].rfc.as_deref(), Some("PNO040302AB1"));
    }

    #[test]
    fn test_positional_revision_reverses_to_chronological() {
        let text = "\
10-Ene-2024|RETIRO CAJERO|9005|500.00|0|5,700.00
08-Ene-2024|PAGO PROVEEDOR|9002|2,000.00|0|6,200.00
05-Ene-2024|DEPOSITO EFECTIVO|9001|0|1,500.00|8,200.00
";
        let parser = BanBajio::new(BajioRevision::Positional);
        let txns = parser.parse(&Document::Text(text), &NoopReporter);
        assert_eq!(txns.len(), 3);
        assert_eq!(txns[0].date, "2024-01-05");
        assert_eq!(txns[2].date, "2024-01-10");
    }

    #[test]
    fn test_positional_ignores_non_date_lines() {
        let text = "\
ENCABEZADO|CUALQUIERA
10-Ene-2024|RETIRO CAJERO|9005|500.00|0|5,700.00
TOTAL|3,000.00
";
        let parser = BanBajio::new(BajioRevision::Positional);
        let txns = parser.parse(&Document::Text(text), &NoopReporter);
        assert_eq!(txns.len(), 1);
    }

    #[test]
    fn test_headered_missing_marker() {
        let parser = BanBajio::new(BajioRevision::Headered);
        let reporter = CollectingReporter::new();
        let txns = parser.parse(&Document::Text("sin encabezado\n"), &reporter);
        assert!(txns.is_empty());
        assert_eq!(reporter.events(), vec![ParseEvent::HeaderNotFound { bank: "banbajio" }]);
    }
}

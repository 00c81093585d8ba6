//! Per-bank tokenizer+miner pairs behind one shared capability.

pub mod afirme;
pub mod banbajio;
pub mod banorte;
pub mod banregio;
pub mod bbva;
pub mod hsbc;
pub mod santander;
pub mod scotiabank;

use edocta_core::{BankIdentity, DateFormat, ParseEvent, ParseReporter, SkipReason, Transaction};

use crate::assemble::assemble;
use crate::document::Document;
use crate::header::scan_header;
use crate::mined::MinedFields;
use crate::row::{RawRow, col};

/// One bank's extraction strategy: a tokenizer that locates and splits the
/// data block, and a miner that enriches the free-text description.
///
/// Implementations are stateless statics; a whole-document `parse` is the
/// provided pipeline over the two operations.
pub trait BankParser: Send + Sync {
    fn identity(&self) -> BankIdentity;

    /// Native layout of the posting-date column.
    fn date_format(&self) -> DateFormat;

    /// Locate the transaction block and split it into mapped rows.
    ///
    /// A missing data block reports a diagnostic and yields no rows;
    /// callers want partial results across a batch, not an error.
    fn tokenize(&self, doc: &Document, reporter: &dyn ParseReporter) -> Vec<RawRow>;

    /// Apply this bank's description grammars, best effort.
    fn mine(&self, description: &str) -> MinedFields;

    /// Full pipeline: tokenize, drop noise rows, mine, assemble.
    fn parse(&self, doc: &Document, reporter: &dyn ParseReporter) -> Vec<Transaction> {
        let header = doc.as_text().map(scan_header).unwrap_or_default();
        let bank = self.identity();

        let mut out = Vec::new();
        for row in self.tokenize(doc, reporter) {
            if !row.is_transaction() {
                let reason = if row.get(col::DATE).is_empty() {
                    SkipReason::MissingDate
                } else {
                    SkipReason::MissingDescription
                };
                reporter.report(ParseEvent::RowSkipped { bank: bank.id, line: row.line, reason });
                continue;
            }
            let mined = self.mine(row.get(col::DESCRIPTION));
            out.push(assemble(&row, &mined, &header, bank, self.date_format()));
        }
        out
    }
}

/// Header-driven tokenizer shared by the comma-delimited banks: the first
/// record is a localized header row, mapped label-by-label to canonical
/// column names; later records are keyed positionally by those names.
pub(crate) fn tokenize_headered_csv(
    text: &str,
    canonical: fn(&str) -> Option<&'static str>,
    bank: &'static str,
    reporter: &dyn ParseReporter,
) -> Vec<RawRow> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                // Position from the reader, not a record count: quoted
                // fields spanning lines would make the two disagree.
                let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
                reporter.report(ParseEvent::RowSkipped {
                    bank,
                    line,
                    reason: SkipReason::UnrecognizedLine,
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        if columns.is_empty() {
            // Unmapped labels pass through under their source spelling.
            columns = record
                .iter()
                .map(|label| {
                    canonical(label)
                        .map(str::to_string)
                        .unwrap_or_else(|| label.trim().to_string())
                })
                .collect();
            continue;
        }

        let mut row = RawRow::new(line);
        for (name, value) in columns.iter().zip(record.iter()) {
            row.set(name, value);
        }
        rows.push(row);
    }

    if columns.is_empty() {
        reporter.report(ParseEvent::HeaderNotFound { bank });
    }
    rows
}

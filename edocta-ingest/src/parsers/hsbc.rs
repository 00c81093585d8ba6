//! HSBC statement parser.
//!
//! The only bank exporting a binary spreadsheet instead of text. The
//! first sheet holds the data: row 0 is a localized header row (labels
//! mapped like the CSV banks), remaining rows are addressed positionally.
//! Rows shorter than the header are skipped. Dates come as `2024/03/15`.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;
use edocta_core::{BankIdentity, DateFormat, ParseEvent, ParseReporter, SkipReason};

use crate::document::Document;
use crate::mine::{SpeiGrammar, extract_spei, extract_transfer_marker};
use crate::mined::MinedFields;
use crate::parsers::BankParser;
use crate::row::{RawRow, col};

pub const IDENTITY: BankIdentity = BankIdentity { id: "hsbc", routing: "021", name: "HSBC México" };

const SPEI_RECEIVED: SpeiGrammar = SpeiGrammar {
    detect: "SPEI RECIBIDO",
    counterparty: "DE:",
    tracking: "CVE RASTREO:",
    time: "HORA LIQ:",
    concept: "CONCEPTO:",
};

fn canonical(label: &str) -> Option<&'static str> {
    match label.trim().to_lowercase().as_str() {
        "fecha" => Some(col::DATE),
        "descripcion" | "descripción" | "descripciã³n" | "concepto" => Some(col::DESCRIPTION),
        "referencia" => Some(col::REFERENCE),
        "retiro" | "retiros" | "cargo" => Some(col::DEBIT),
        "deposito" | "depósito" | "depositos" | "abono" => Some(col::CREDIT),
        "saldo" => Some(col::BALANCE),
        "cuenta" => Some(col::ACCOUNT),
        _ => None,
    }
}

/// Excel serial day to the `YYYY/MM/DD` layout the text exports use.
/// Day 0 is 1899-12-30 (the 1900 leap-year quirk folded in).
fn excel_serial_to_date(serial: f64) -> String {
    if serial < 0.0 {
        return serial.to_string();
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|base| base.checked_add_days(chrono::Days::new(serial as u64)))
        .map(|d| d.format("%Y/%m/%d").to_string())
        .unwrap_or_else(|| serial.to_string())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Float(f) => format!("{f}"),
        Data::Int(i) => i.to_string(),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Map header-row labels plus positional data rows, shared with the tests
/// so the mapping logic is exercised without workbook bytes.
fn map_sheet_rows(sheet: &[Vec<String>]) -> Vec<RawRow> {
    let Some((header, data)) = sheet.split_first() else { return Vec::new() };
    let columns: Vec<String> = header
        .iter()
        .map(|label| {
            canonical(label)
                .map(str::to_string)
                .unwrap_or_else(|| label.trim().to_string())
        })
        .collect();

    let mut rows = Vec::new();
    for (idx, cells) in data.iter().enumerate() {
        if cells.len() < columns.len() {
            continue;
        }
        let mut row = RawRow::new(idx + 2);
        for (name, value) in columns.iter().zip(cells.iter()) {
            row.set(name, value);
        }
        rows.push(row);
    }
    rows
}

pub struct Hsbc;

impl BankParser for Hsbc {
    fn identity(&self) -> BankIdentity {
        IDENTITY
    }

    fn date_format(&self) -> DateFormat {
        DateFormat::YearMonthDay
    }

    fn tokenize(&self, doc: &Document, reporter: &dyn ParseReporter) -> Vec<RawRow> {
        let Some(bytes) = doc.as_workbook() else {
            reporter.report(ParseEvent::WorkbookUnreadable { bank: IDENTITY.id });
            return Vec::new();
        };
        let Ok(mut workbook) = Xlsx::new(Cursor::new(bytes.to_vec())) else {
            reporter.report(ParseEvent::WorkbookUnreadable { bank: IDENTITY.id });
            return Vec::new();
        };
        let Some(Ok(range)) = workbook.worksheet_range_at(0) else {
            reporter.report(ParseEvent::HeaderNotFound { bank: IDENTITY.id });
            return Vec::new();
        };

        let sheet: Vec<Vec<String>> = range
            .rows()
            .map(|cells| cells.iter().map(cell_text).collect())
            .collect();
        if sheet.len() < 2 {
            reporter.report(ParseEvent::HeaderNotFound { bank: IDENTITY.id });
            return Vec::new();
        }

        let header_len = sheet[0].len();
        for (idx, cells) in sheet.iter().enumerate().skip(1) {
            if cells.len() < header_len {
                reporter.report(ParseEvent::RowSkipped {
                    bank: IDENTITY.id,
                    line: idx + 1,
                    reason: SkipReason::TooFewColumns,
                });
            }
        }
        map_sheet_rows(&sheet)
    }

    fn mine(&self, description: &str) -> MinedFields {
        extract_spei(description, &SPEI_RECEIVED)
            .or_else(|| extract_transfer_marker(description))
            .unwrap_or_else(|| MinedFields::unmatched(description))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edocta_core::CollectingReporter;

    fn sheet(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_header_row_maps_localized_labels() {
        let sheet = sheet(&[
            &["Fecha", "Descripcion", "Referencia", "Retiro", "Deposito", "Saldo"],
            &["2024/03/15", "DEPOSITO VENTANILLA", "H100", "", "2500.00", "9100.00"],
            &["2024/03/16", "COMPRA FARMACIA", "H101", "180.00", "", "8920.00"],
        ]);
        let rows = map_sheet_rows(&sheet);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get(col::DATE), "2024/03/15");
        assert_eq!(rows[0].get(col::CREDIT), "2500.00");
        assert_eq!(rows[1].get(col::DEBIT), "180.00");
    }

    #[test]
    fn test_rows_shorter_than_header_are_skipped() {
        let sheet = sheet(&[
            &["Fecha", "Descripcion", "Retiro", "Deposito", "Saldo"],
            &["2024/03/15", "OK", "", "100.00", "100.00"],
            &["TOTAL", "100.00"],
        ]);
        let rows = map_sheet_rows(&sheet);
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_unmapped_label_passes_through() {
        let sheet = sheet(&[
            &["Fecha", "Descripcion", "Sucursal", "Deposito", "Saldo"],
            &["2024/03/15", "DEPOSITO", "MTY-04", "100.00", "100.00"],
        ]);
        let rows = map_sheet_rows(&sheet);
        assert_eq!(rows[0].get("Sucursal"), "MTY-04");
    }

    #[test]
    fn test_excel_serial_dates_become_slash_dates() {
        assert_eq!(excel_serial_to_date(45366.0), "2024/03/15");
        assert_eq!(excel_serial_to_date(43831.0), "2020/01/01");
        assert_eq!(excel_serial_to_date(-1.0), "-1");
    }

    #[test]
    fn test_garbage_bytes_report_unreadable_workbook() {
        let reporter = CollectingReporter::new();
        let rows = Hsbc.tokenize(&Document::Workbook(&[0u8, 1, 2, 3]), &reporter);
        assert!(rows.is_empty());
        assert_eq!(reporter.events(), vec![ParseEvent::WorkbookUnreadable { bank: "hsbc" }]);
    }

    #[test]
    fn test_text_document_is_not_a_workbook() {
        let reporter = CollectingReporter::new();
        let rows = Hsbc.tokenize(&Document::Text("Fecha,Descripcion\n"), &reporter);
        assert!(rows.is_empty());
        assert!(!reporter.is_empty());
    }
}

//! edocta-ingest: per-bank statement extraction pipeline for Mexican banks.
//!
//! One document in, one sequence of uniform [`Transaction`]s out. Each
//! supported bank pairs a tokenizer (locate + split the data block) with
//! a description miner (recover SPEI/RFC sub-fields from free text),
//! selected through a flat static registry keyed by lowercase bank id.

pub mod assemble;
pub mod document;
pub mod error;
pub mod header;
pub mod mine;
pub mod mined;
pub mod parsers;
pub mod row;
pub mod split;

use edocta_core::{ParseReporter, Transaction};

pub use document::Document;
pub use error::IngestError;
pub use header::{HeaderMetadata, scan_header};
pub use mined::MinedFields;
pub use parsers::BankParser;
pub use row::RawRow;

use parsers::banbajio::{BajioRevision, BanBajio};
use parsers::banregio::{Banregio, BanregioRevision};
use parsers::scotiabank::{OffsetTable, Scotiabank};
use parsers::{afirme::Afirme, banorte::Banorte, bbva::Bbva, hsbc::Hsbc, santander::Santander};

static AFIRME: Afirme = Afirme;
static BANBAJIO: BanBajio = BanBajio::new(BajioRevision::Headered);
static BANORTE: Banorte = Banorte;
static BANREGIO: Banregio = Banregio::new(BanregioRevision::Current);
static BBVA: Bbva = Bbva;
static HSBC: Hsbc = Hsbc;
static SANTANDER: Santander = Santander;
static SCOTIABANK: Scotiabank = Scotiabank::new(OffsetTable::CURRENT);

/// Supported lowercase bank keys, in registry order.
pub const SUPPORTED_BANKS: [&str; 8] = [
    "afirme",
    "banbajio",
    "banorte",
    "banregio",
    "bbva",
    "hsbc",
    "santander",
    "scotiabank",
];

/// Select the tokenizer+miner pair for a bank identifier.
///
/// The identifier is matched case-insensitively against the fixed key set;
/// an unknown key is the one hard error this layer surfaces. Banks with
/// several format revisions resolve to their default here; other revisions
/// are reachable through the parser constructors
/// (e.g. [`Banregio::new`], [`Scotiabank::new`]).
pub fn select_parser(bank: &str) -> Result<&'static dyn BankParser, IngestError> {
    match bank.trim().to_ascii_lowercase().as_str() {
        "afirme" => Ok(&AFIRME),
        "banbajio" => Ok(&BANBAJIO),
        "banorte" => Ok(&BANORTE),
        "banregio" => Ok(&BANREGIO),
        "bbva" => Ok(&BBVA),
        "hsbc" => Ok(&HSBC),
        "santander" => Ok(&SANTANDER),
        "scotiabank" => Ok(&SCOTIABANK),
        other => Err(IngestError::UnsupportedBank(other.to_string())),
    }
}

/// One whole document: header metadata plus the transaction sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub header: HeaderMetadata,
    pub transactions: Vec<Transaction>,
}

/// Dispatch and parse in one call.
pub fn parse_statement(
    bank: &str,
    doc: &Document,
    reporter: &dyn ParseReporter,
) -> Result<Statement, IngestError> {
    let parser = select_parser(bank)?;
    let header = doc.as_text().map(scan_header).unwrap_or_default();
    let transactions = parser.parse(doc, reporter);
    Ok(Statement { header, transactions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use edocta_core::NoopReporter;

    #[test]
    fn test_select_parser_is_case_insensitive() {
        assert_eq!(select_parser("Banorte").unwrap().identity().id, "banorte");
        assert_eq!(select_parser(" SCOTIABANK ").unwrap().identity().id, "scotiabank");
    }

    #[test]
    fn test_unknown_bank_is_a_hard_error() {
        match select_parser("unknownbank") {
            Err(IngestError::UnsupportedBank(key)) => assert_eq!(key, "unknownbank"),
            Ok(_) => panic!("expected UnsupportedBank"),
        }
    }

    #[test]
    fn test_every_supported_key_resolves() {
        for key in SUPPORTED_BANKS {
            let parser = select_parser(key).unwrap();
            assert_eq!(parser.identity().id, key);
        }
    }

    #[test]
    fn test_parse_statement_carries_header_metadata() {
        let text = "\
CUENTA: 058123456789
Fecha,Descripción,Referencia,Cargo,Abonos,Saldo,Clasificación
01/03/2024,DEPOSITO,1,0,100.00,100.00,Dep
";
        let stmt = parse_statement("banregio", &Document::Text(text), &NoopReporter).unwrap();
        assert_eq!(stmt.header.account_number.as_deref(), Some("058123456789"));
        assert_eq!(stmt.transactions.len(), 1);
    }
}

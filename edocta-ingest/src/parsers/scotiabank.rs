//! Scotiabank fixed-width statement parser.
//!
//! Each transaction is one fixed-length line tagged `CHQMXN` at offset 0;
//! every field lives at a constant byte range. Two layout revisions are
//! shipped because the description offset moved between format versions
//! (85 in the legacy layout, 135 in the current one); the layout is part
//! of the parser's configuration, never inferred from the line.
//!
//! Current layout:
//!   0..6    record tag "CHQMXN"
//!   6..17   account number
//!   17..25  date DDMMYYYY
//!   25..32  reference
//!   32..47  amount (right-aligned)
//!   47..48  operation flag: 'A' abono/credit, anything else cargo/debit
//!   48..63  running balance
//!   135..165 description

use edocta_core::{BankIdentity, DateFormat, ParseEvent, ParseReporter, SkipReason};

use crate::document::Document;
use crate::mine::{SpeiGrammar, extract_spei, find_rfc};
use crate::mined::MinedFields;
use crate::parsers::BankParser;
use crate::row::{RawRow, col};

pub const IDENTITY: BankIdentity = BankIdentity { id: "scotiabank", routing: "044", name: "Scotiabank" };

const RECORD_TAG: &str = "CHQMXN";
const CREDIT_FLAG: u8 = b'A';

const SPEI_RECEIVED: SpeiGrammar = SpeiGrammar {
    detect: "SPEI RECIBIDO",
    counterparty: "DE:",
    tracking: "CVE RASTREO:",
    time: "HORA LIQ:",
    concept: "CONCEPTO:",
};

/// Byte ranges for one layout revision. Offsets are half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTable {
    pub account: (usize, usize),
    pub date: (usize, usize),
    pub reference: (usize, usize),
    pub amount: (usize, usize),
    pub flag: usize,
    pub balance: (usize, usize),
    pub description: (usize, usize),
}

impl OffsetTable {
    /// Current export layout, description at 135.
    pub const CURRENT: OffsetTable = OffsetTable {
        account: (6, 17),
        date: (17, 25),
        reference: (25, 32),
        amount: (32, 47),
        flag: 47,
        balance: (48, 63),
        description: (135, 165),
    };

    /// Pre-2020 layout, description at 85.
    pub const LEGACY: OffsetTable = OffsetTable {
        account: (6, 17),
        date: (17, 25),
        reference: (25, 32),
        amount: (32, 47),
        flag: 47,
        balance: (48, 63),
        description: (85, 115),
    };

    /// Shortest line that still carries the numeric block.
    fn min_len(&self) -> usize {
        self.balance.1
    }
}

fn field(line: &str, range: (usize, usize)) -> &str {
    let end = range.1.min(line.len());
    line.get(range.0..end).unwrap_or("").trim()
}

pub struct Scotiabank {
    offsets: OffsetTable,
}

impl Scotiabank {
    pub const fn new(offsets: OffsetTable) -> Self {
        Self { offsets }
    }
}

impl BankParser for Scotiabank {
    fn identity(&self) -> BankIdentity {
        IDENTITY
    }

    fn date_format(&self) -> DateFormat {
        DateFormat::Compact
    }

    fn tokenize(&self, doc: &Document, reporter: &dyn ParseReporter) -> Vec<RawRow> {
        let Some(text) = doc.as_text() else { return Vec::new() };
        let offsets = &self.offsets;

        let mut rows = Vec::new();
        let mut saw_tag = false;
        for (idx, line) in text.lines().enumerate() {
            if !line.starts_with(RECORD_TAG) {
                continue;
            }
            saw_tag = true;
            if line.len() < offsets.min_len() {
                reporter.report(ParseEvent::RowSkipped {
                    bank: IDENTITY.id,
                    line: idx + 1,
                    reason: SkipReason::TooFewColumns,
                });
                continue;
            }

            let amount = field(line, offsets.amount);
            // Byte-indexed like every other field; char positions drift
            // once a multibyte character appears earlier in the line.
            let is_credit = line.as_bytes().get(offsets.flag) == Some(&CREDIT_FLAG);

            let mut row = RawRow::new(idx + 1);
            row.set(col::ACCOUNT, field(line, offsets.account));
            row.set(col::DATE, field(line, offsets.date));
            row.set(col::REFERENCE, field(line, offsets.reference));
            row.set(col::BALANCE, field(line, offsets.balance));
            row.set(col::DESCRIPTION, field(line, offsets.description));
            if is_credit {
                row.set(col::CREDIT, amount);
            } else {
                row.set(col::DEBIT, amount);
            }
            rows.push(row);
        }

        if !saw_tag {
            reporter.report(ParseEvent::HeaderNotFound { bank: IDENTITY.id });
        }
        rows
    }

    fn mine(&self, description: &str) -> MinedFields {
        extract_spei(description, &SPEI_RECEIVED)
            .or_else(|| mine_rfc_only(description))
            .unwrap_or_else(|| MinedFields::unmatched(description))
    }
}

fn mine_rfc_only(description: &str) -> Option<MinedFields> {
    let rfc = find_rfc(description)?;
    Some(MinedFields {
        rfc: Some(rfc),
        actual_description: Some(description.trim().to_string()),
        ..MinedFields::default()
    })
}

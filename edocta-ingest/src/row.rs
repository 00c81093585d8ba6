//! Raw tokenized row: canonical column name -> string value.

use std::collections::BTreeMap;

/// Canonical column names shared across all bank tokenizers.
pub mod col {
    pub const DATE: &str = "date";
    pub const DESCRIPTION: &str = "description";
    pub const DEBIT: &str = "debit";
    pub const CREDIT: &str = "credit";
    pub const BALANCE: &str = "balance";
    pub const REFERENCE: &str = "reference";
    pub const ACCOUNT: &str = "account";
    pub const CATEGORY: &str = "category";
}

/// One transaction line after tokenization and column mapping.
///
/// Column sets vary per bank (7-9 columns); unmapped source labels pass
/// through under their original name. Values are stored as found in the
/// export; normalization happens at assembly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    cols: BTreeMap<String, String>,
    /// 1-based source line (0 for spreadsheet rows addressed by index).
    pub line: usize,
}

impl RawRow {
    pub fn new(line: usize) -> Self {
        Self { cols: BTreeMap::new(), line }
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.cols.insert(name.to_string(), value.trim().to_string());
    }

    /// Value for a canonical column, empty string when absent.
    pub fn get(&self, name: &str) -> &str {
        self.cols.get(name).map(String::as_str).unwrap_or("")
    }

    /// Rows without a date or description are statement noise
    /// (footers, section breaks, summary lines), not transactions.
    pub fn is_transaction(&self) -> bool {
        !self.get(col::DATE).is_empty() && !self.get(col::DESCRIPTION).is_empty()
    }

    /// JSON form of the column map, retained on the output record for audit.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.cols).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_reads_empty() {
        let row = RawRow::new(1);
        assert_eq!(row.get(col::DATE), "");
        assert!(!row.is_transaction());
    }

    #[test]
    fn test_transaction_invariant_needs_date_and_description() {
        let mut row = RawRow::new(3);
        row.set(col::DATE, "01/03/2024");
        assert!(!row.is_transaction());
        row.set(col::DESCRIPTION, "  PAGO TARJETA ");
        assert!(row.is_transaction());
        assert_eq!(row.get(col::DESCRIPTION), "PAGO TARJETA");
    }

    #[test]
    fn test_json_round_trips_columns() {
        let mut row = RawRow::new(2);
        row.set(col::DATE, "01/03/2024");
        row.set(col::CREDIT, "500.00");
        let json = row.to_json();
        assert!(json.contains("\"date\":\"01/03/2024\""));
        assert!(json.contains("\"credit\":\"500.00\""));
    }
}

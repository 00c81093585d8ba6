//! Uniform output record shared by every bank parser.

use serde::Serialize;

/// Credit/debit discriminator, mirroring the sign of `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnKind {
    Credit,
    Debit,
}

/// Fixed identity constant for a supported bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BankIdentity {
    /// Lowercase dispatch key, e.g. `"banorte"`.
    pub id: &'static str,
    /// ABM routing code, e.g. `"072"`.
    pub routing: &'static str,
    /// Display name, e.g. `"Banorte"`.
    pub name: &'static str,
}

/// Normalized output of statement parsers (bank-agnostic).
///
/// One instance per valid statement row; immutable once assembled.
/// `amount` is positive for credits and a negative magnitude for debits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// ISO `YYYY-MM-DD` (original text when normalization failed).
    pub date: String,
    /// Settlement time mined from the description, when present.
    pub time: Option<String>,
    #[serde(rename = "type")]
    pub kind: TxnKind,
    pub amount: f64,
    pub balance: f64,
    pub reference: String,
    pub account_number: Option<String>,
    /// Mined description when a grammar matched, else the trimmed raw field.
    pub description: String,
    pub beneficiary: Option<String>,
    /// SPEI clave de rastreo.
    pub tracking_key: Option<String>,
    pub rfc: Option<String>,
    pub concept: Option<String>,
    pub bank: BankIdentity,
    /// Serialized originating row, kept for audit/debugging.
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_kind_as_lowercase_type() {
        let txn = Transaction {
            date: "2024-03-01".to_string(),
            time: None,
            kind: TxnKind::Credit,
            amount: 500.0,
            balance: 1500.0,
            reference: "REF123".to_string(),
            account_number: None,
            description: "PAGO".to_string(),
            beneficiary: None,
            tracking_key: None,
            rfc: None,
            concept: None,
            bank: BankIdentity { id: "afirme", routing: "062", name: "Afirme" },
            raw: "{}".to_string(),
        };
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "credit");
        assert_eq!(json["bank"]["routing"], "062");
    }
}

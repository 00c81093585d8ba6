//! Final assembly: tokenized row + mined fields + bank identity -> Transaction.

use edocta_core::{BankIdentity, DateFormat, Transaction, TxnKind, format_date, parse_currency};

use crate::header::HeaderMetadata;
use crate::mined::MinedFields;
use crate::row::{RawRow, col};

/// Build the uniform output record for one valid row.
///
/// Sign convention: `amount = credit` when credit is non-zero, else
/// `-debit`; `kind` mirrors the sign. A date mined out of the description
/// wins over the posting date, since the posting date is the later of the
/// two when they differ.
pub fn assemble(
    row: &RawRow,
    mined: &MinedFields,
    header: &HeaderMetadata,
    bank: BankIdentity,
    date_format: DateFormat,
) -> Transaction {
    let credit = parse_currency(row.get(col::CREDIT));
    let debit = parse_currency(row.get(col::DEBIT));
    let (kind, amount) = if credit != 0.0 {
        (TxnKind::Credit, credit)
    } else {
        (TxnKind::Debit, -debit)
    };

    let date = mined
        .transaction_date
        .clone()
        .unwrap_or_else(|| format_date(row.get(col::DATE), date_format));

    let description = mined
        .actual_description
        .clone()
        .unwrap_or_else(|| row.get(col::DESCRIPTION).trim().to_string());

    let account_number = match row.get(col::ACCOUNT) {
        "" => header.account_number.clone(),
        acct => Some(acct.to_string()),
    };

    Transaction {
        date,
        time: mined.time.clone(),
        kind,
        amount,
        balance: parse_currency(row.get(col::BALANCE)),
        reference: row.get(col::REFERENCE).to_string(),
        account_number,
        description,
        beneficiary: mined.beneficiary.clone(),
        tracking_key: mined.tracking_key.clone(),
        rfc: mined.rfc.clone(),
        concept: mined.concept.clone(),
        bank,
        raw: row.to_json(),
    }
}

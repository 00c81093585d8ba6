//! edocta-core: shared types and normalizers for Mexican bank statement ingestion.

pub mod dates;
pub mod money;
pub mod report;
pub mod transaction;

pub use dates::{DateFormat, format_date};
pub use money::parse_currency;
pub use report::{CollectingReporter, NoopReporter, ParseEvent, ParseReporter, SkipReason};
pub use transaction::{BankIdentity, Transaction, TxnKind};

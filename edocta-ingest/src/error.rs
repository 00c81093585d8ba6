//! Ingest errors. Only bank selection fails hard; everything inside a
//! document parse degrades to diagnostics and partial results.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("unsupported bank identifier: {0:?}")]
    UnsupportedBank(String),
}

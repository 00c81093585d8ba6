//! Statement header metadata: labeled key/value pairs above the data block.
//!
//! Exports usually open with a few lines like:
//!   CLIENTE: COMERCIALIZADORA EJEMPLO SA DE CV
//!   CUENTA: 012345678901
//!   RFC: CEJ123456AB7
//!   PERIODO: 01/03/2024 AL 31/03/2024

/// Account-level metadata scanned once per document and shared by every
/// row assembly in that document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderMetadata {
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    pub rfc: Option<String>,
    pub clabe: Option<String>,
    pub period: Option<String>,
}

/// Lines scanned for labels before giving up; metadata never appears
/// below the transaction block.
const SCAN_LINES: usize = 15;

fn labeled_value(line: &str, labels: &[&str]) -> Option<String> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim().to_uppercase();
    if labels.iter().any(|l| key == *l) {
        let value = value.trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    None
}

/// Scan a bounded prefix of the document for labeled metadata pairs.
pub fn scan_header(text: &str) -> HeaderMetadata {
    let mut meta = HeaderMetadata::default();
    for line in text.lines().take(SCAN_LINES) {
        if meta.account_number.is_none() {
            meta.account_number = labeled_value(line, &["CUENTA", "NO. DE CUENTA", "NUMERO DE CUENTA"]);
        }
        if meta.account_name.is_none() {
            meta.account_name = labeled_value(line, &["CLIENTE", "NOMBRE", "TITULAR"]);
        }
        if meta.rfc.is_none() {
            meta.rfc = labeled_value(line, &["RFC"]);
        }
        if meta.clabe.is_none() {
            meta.clabe = labeled_value(line, &["CLABE"]);
        }
        if meta.period.is_none() {
            meta.period = labeled_value(line, &["PERIODO", "PERIODO DEL ESTADO"]);
        }
    }
    meta
}

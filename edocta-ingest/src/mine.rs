//! Shared description-mining helpers.
//!
//! SPEI descriptions pack labeled sub-segments into one free-text field:
//!   SPEI RECIBIDO BCO:072 CVE RAST: 2024MBAN01000123 HR LIQ: 13:45:02
//!   CONCEPTO: PAGO FACTURA 881 RFC CEJ123456AB7
//! Labels and spellings vary per bank, so each parser supplies a
//! [`SpeiGrammar`] with its own label set and this module does the cutting.
//! Everything here is total: a miss is `None`, never an error.

use edocta_core::{DateFormat, format_date};
use regex::Regex;

use crate::mined::MinedFields;

/// RFC tax id: 3-4 letter prefix, 6-digit date, 3-char homoclave.
pub const RFC_PATTERN: &str = r"\b([A-ZÑ&]{3,4}[0-9]{6}[A-Z0-9]{3})\b";

/// Label set for one SPEI description grammar.
pub struct SpeiGrammar {
    /// Literal that must appear for this grammar to apply.
    pub detect: &'static str,
    /// Label preceding the counterparty name (sender or beneficiary).
    pub counterparty: &'static str,
    pub tracking: &'static str,
    pub time: &'static str,
    pub concept: &'static str,
}

impl SpeiGrammar {
    fn stops(&self) -> [&'static str; 5] {
        [self.counterparty, self.tracking, self.time, self.concept, "RFC"]
    }
}

/// First RFC-shaped token in the text.
pub fn find_rfc(text: &str) -> Option<String> {
    let re = Regex::new(RFC_PATTERN).ok()?;
    re.captures(text).map(|c| c[1].to_string())
}

/// First `HH:MM` or `HH:MM:SS` token in the text.
pub fn find_time(text: &str) -> Option<String> {
    let re = Regex::new(r"\b(\d{2}:\d{2}(?::\d{2})?)\b").ok()?;
    re.captures(text).map(|c| c[1].to_string())
}

/// First `DD/MM/YYYY` token, normalized to ISO.
pub fn find_embedded_date(text: &str) -> Option<String> {
    let re = Regex::new(r"\b(\d{2}/\d{2}/\d{4})\b").ok()?;
    let raw = re.captures(text).map(|c| c[1].to_string())?;
    let iso = format_date(&raw, DateFormat::DayMonthYear4);
    // format_date echoes invalid input; only a real conversion counts.
    (iso != raw).then_some(iso)
}

/// Value following `label`, cut at the earliest of the `stops` labels.
///
/// The regex crate has no lookahead, so segments are cut by hand: take the
/// text after the label, then truncate at the first occurrence of any
/// other known label.
pub fn labeled_segment(text: &str, label: &str, stops: &[&str]) -> Option<String> {
    let start = text.find(label)? + label.len();
    let mut rest = &text[start..];
    let mut end = rest.len();
    for stop in stops {
        if *stop == label {
            continue;
        }
        if let Some(pos) = rest.find(stop) {
            end = end.min(pos);
        }
    }
    rest = &rest[..end];
    let value = rest.trim().trim_matches(':').trim();
    (!value.is_empty()).then(|| collapse_spaces(value))
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Apply one SPEI grammar; `None` when its detect literal is absent.
pub fn extract_spei(text: &str, grammar: &SpeiGrammar) -> Option<MinedFields> {
    if !text.contains(grammar.detect) {
        return None;
    }
    let stops = grammar.stops();

    let beneficiary = labeled_segment(text, grammar.counterparty, &stops)
        .map(|v| strip_rfc_tail(&v));
    let tracking_key = labeled_segment(text, grammar.tracking, &stops)
        .map(|v| v.split_whitespace().next().unwrap_or(&v).to_string());
    let time = labeled_segment(text, grammar.time, &stops).and_then(|v| find_time(&v));
    let concept = labeled_segment(text, grammar.concept, &stops).map(|v| strip_rfc_tail(&v));
    let rfc = find_rfc(text);

    // Composite display description: concept plus counterparty, whichever
    // halves are present; the raw blob stays on the record as `raw`.
    let actual_description = match (&concept, &beneficiary) {
        (Some(c), Some(b)) => Some(format!("{c} {b}")),
        (Some(c), None) => Some(c.clone()),
        (None, Some(b)) => Some(format!("{} {b}", grammar.detect)),
        (None, None) => None,
    };

    // No transaction_date here: a bare DD/MM/YYYY inside free concept text
    // is invoice/period data, not the operation date. Embedded dates are
    // only mined where a label anchors them (Santander).
    Some(MinedFields {
        beneficiary,
        tracking_key,
        rfc,
        concept,
        time,
        actual_description,
        ..MinedFields::default()
    })
}

fn strip_rfc_tail(value: &str) -> String {
    if let Ok(re) = Regex::new(RFC_PATTERN) {
        let stripped = re.replace_all(value, "");
        return collapse_spaces(stripped.trim());
    }
    value.to_string()
}

/// Parenthesized transfer markers: `TRANSFERENCIA (BE) 0123456789 NOMBRE`.
///
/// `(BE)`/`(NB)` code transfers to own-bank / other-bank accounts; what
/// follows is the account reference and the beneficiary phrase.
pub fn extract_transfer_marker(text: &str) -> Option<MinedFields> {
    let re = Regex::new(r"TRANSFERENCIA\s*\((?:BE|NB)\)\s*(\d+)\s+(.+)").ok()?;
    let caps = re.captures(text)?;
    let reference = caps[1].to_string();
    let beneficiary = collapse_spaces(caps[2].trim());
    Some(MinedFields {
        beneficiary: Some(beneficiary.clone()),
        rfc: find_rfc(text),
        actual_description: Some(format!("Transferencia {reference} {beneficiary}")),
        ..MinedFields::default()
    })
}

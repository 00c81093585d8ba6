//! Currency normalization for statement amount columns.
//!
//! Exports format amounts inconsistently: `$1,234.56`, `"1,234.56"`,
//! `'500.00'`, bare `0`. Everything funnels through [`parse_currency`]
//! before the sign convention is applied.

/// Parse a locale-formatted amount into a float.
///
/// Strips currency symbols, grouping commas, quote characters, and
/// whitespace. Empty or unparseable input yields `0.0` rather than an
/// error; a zero amount and a missing amount are equivalent downstream.
pub fn parse_currency(input: &str) -> f64 {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '"' | '\'' | ' ' | '\t'))
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return 0.0;
    }
    cleaned.parse().unwrap_or(0.0)
}

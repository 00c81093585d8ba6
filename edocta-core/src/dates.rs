//! Date normalization: each bank's native representation to ISO `YYYY-MM-DD`.
//!
//! Malformed input is returned unchanged instead of failing the row; a
//! cosmetic date defect should not drop an otherwise valid transaction.

use chrono::NaiveDate;

/// Native date layouts observed across the supported banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `31/12/24`
    DayMonthYear2,
    /// `31/12/2024`
    DayMonthYear4,
    /// `31122024` (fixed-width and quoted-token exports)
    Compact,
    /// `31-Dic-2024` (Spanish month abbreviation)
    DayMonthAbbrYear,
    /// `2024/12/31`
    YearMonthDay,
}

fn month_from_abbr(abbr: &str) -> Option<u32> {
    let m = match abbr.to_ascii_lowercase().as_str() {
        "ene" => 1,
        "feb" => 2,
        "mar" => 3,
        "abr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "ago" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dic" => 12,
        _ => return None,
    };
    Some(m)
}

fn iso(year: i32, month: u32, day: u32) -> Option<String> {
    // Calendar-validate before formatting; 31/02 must fall through.
    let d = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(d.format("%Y-%m-%d").to_string())
}

fn convert(input: &str, format: DateFormat) -> Option<String> {
    let s = input.trim();
    match format {
        DateFormat::DayMonthYear2 => {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() != 3 {
                return None;
            }
            let d: u32 = parts[0].parse().ok()?;
            let m: u32 = parts[1].parse().ok()?;
            let y: i32 = parts[2].parse().ok()?;
            if parts[2].len() != 2 {
                return None;
            }
            iso(2000 + y, m, d)
        }
        DateFormat::DayMonthYear4 => {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() != 3 || parts[2].len() != 4 {
                return None;
            }
            let d: u32 = parts[0].parse().ok()?;
            let m: u32 = parts[1].parse().ok()?;
            let y: i32 = parts[2].parse().ok()?;
            iso(y, m, d)
        }
        DateFormat::Compact => {
            if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let d: u32 = s[0..2].parse().ok()?;
            let m: u32 = s[2..4].parse().ok()?;
            let y: i32 = s[4..8].parse().ok()?;
            iso(y, m, d)
        }
        DateFormat::DayMonthAbbrYear => {
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() != 3 {
                return None;
            }
            let d: u32 = parts[0].parse().ok()?;
            let m = month_from_abbr(parts[1])?;
            let y: i32 = parts[2].parse().ok()?;
            iso(y, m, d)
        }
        DateFormat::YearMonthDay => {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() != 3 || parts[0].len() != 4 {
                return None;
            }
            let y: i32 = parts[0].parse().ok()?;
            let m: u32 = parts[1].parse().ok()?;
            let d: u32 = parts[2].parse().ok()?;
            iso(y, m, d)
        }
    }
}

/// Normalize a bank-native date string to ISO `YYYY-MM-DD`.
///
/// Returns the input unchanged (trimmed) when it does not parse under the
/// given format.
pub fn format_date(input: &str, format: DateFormat) -> String {
    convert(input, format).unwrap_or_else(|| input.trim().to_string())
}

//! Pure normalizers for the free-form date and amount strings that come out
//! of statement tables and text lines. Both are total: they return
//! `None`/zero on failure instead of erroring.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Formats carrying a full date, tried in order. Order is the tie-break
/// policy between ambiguous layouts: US month-first wins over day-first.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y",
    "%m/%d/%y",
    "%d/%m/%Y",
    "%d/%m/%y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Day + month without a year ("05 Mar"); the reference year is appended
/// before parsing with these.
const YEARLESS_FORMATS: &[&str] = &["%d %b %Y", "%d %B %Y"];

/// Parse a statement date. First matching format wins; formats without a
/// year resolve against `reference_year`. Returns `None` on total failure.
pub fn parse_date(text: &str, reference_year: i32) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return Some(date);
        }
    }

    let with_year = format!("{text} {reference_year}");
    for fmt in YEARLESS_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&with_year, fmt) {
            return Some(date);
        }
    }

    None
}

/// Parse a statement amount. Strips everything except digits, the decimal
/// point, and a minus sign; a parenthesized amount is forced negative
/// (accounting convention). Non-numeric input yields zero, never an error.
pub fn parse_amount(text: &str) -> Decimal {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let parenthesized = trimmed.contains('(') && trimmed.contains(')');

    match Decimal::from_str(&cleaned) {
        Ok(value) if parenthesized => -value.abs(),
        Ok(value) => value,
        Err(_) => Decimal::ZERO,
    }
}

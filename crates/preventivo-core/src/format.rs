//! Display formatting for field values.

use jiff::ToSpan;
use jiff::civil::Date;

/// Sentinel printed for any value the store did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// How long a quote stays valid after its issue date.
pub const VALIDITY_DAYS: i64 = 30;

const MONTHS: [&str; 12] = [
    "Gennaio",
    "Febbraio",
    "Marzo",
    "Aprile",
    "Maggio",
    "Giugno",
    "Luglio",
    "Agosto",
    "Settembre",
    "Ottobre",
    "Novembre",
    "Dicembre",
];

/// Format a deposit percentage.
///
/// Values below 1 are fractions (`0.3` → `30%`); anything else is already in
/// percentage points (`30` → `30%`). The sentinel, values that already carry a
/// `%`, values that are not numbers and numbers too large to round come back
/// unchanged.
pub fn format_percentage(value: &str) -> String {
    if value == NOT_AVAILABLE || value.contains('%') {
        return value.to_string();
    }

    let num = match value.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => return value.to_string(),
    };

    let points = if num < 1.0 { num * 100.0 } else { num };
    match round_half_up(points) {
        Some(rounded) => format!("{rounded}%"),
        None => value.to_string(),
    }
}

/// Round to the nearest integer, halves toward positive infinity. `None`
/// outside the `i64` range.
fn round_half_up(x: f64) -> Option<i64> {
    let rounded = (x + 0.5).floor();
    (rounded >= i64::MIN as f64 && rounded < i64::MAX as f64).then_some(rounded as i64)
}

/// `"<day> <Month> <year>"` with Italian month names, e.g. `"5 Marzo 2025"`.
pub fn format_italian_date(date: Date) -> String {
    let month = MONTHS[(date.month() - 1) as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Last day a quote issued on `issue` is valid.
pub fn validity_date(issue: Date) -> Date {
    issue
        .checked_add(VALIDITY_DAYS.days())
        .unwrap_or(Date::MAX)
}

/// Value or the "N/A" sentinel.
pub fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or(NOT_AVAILABLE)
}

/// Value or `"0"`, for currency-like fields.
pub fn or_zero(value: Option<&str>) -> &str {
    value.unwrap_or("0")
}

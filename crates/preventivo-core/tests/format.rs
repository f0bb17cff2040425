use jiff::civil::date;

use preventivo_core::format::{
    format_italian_date, format_percentage, or_na, or_zero, validity_date,
};

#[test]
fn fractions_become_percentage_points() {
    assert_eq!(format_percentage("0.3"), "30%");
    assert_eq!(format_percentage("0.25"), "25%");
    assert_eq!(format_percentage("0"), "0%");
    assert_eq!(format_percentage("0.999"), "100%");
}

#[test]
fn whole_points_are_rounded_not_scaled() {
    assert_eq!(format_percentage("1"), "1%");
    assert_eq!(format_percentage("30"), "30%");
    assert_eq!(format_percentage("33.4"), "33%");
    assert_eq!(format_percentage("33.5"), "34%");
}

#[test]
fn halves_round_up() {
    assert_eq!(format_percentage("0.125"), "13%");
    assert_eq!(format_percentage("2.5"), "3%");
}

#[test]
fn sentinel_and_suffixed_values_pass_through() {
    assert_eq!(format_percentage("N/A"), "N/A");
    assert_eq!(format_percentage("25%"), "25%");
    assert_eq!(format_percentage("0.5%"), "0.5%");
}

#[test]
fn non_numeric_values_pass_through() {
    assert_eq!(format_percentage("metà"), "metà");
    assert_eq!(format_percentage(""), "");
    assert_eq!(format_percentage("inf"), "inf");
    assert_eq!(format_percentage("NaN"), "NaN");
}

#[test]
fn numbers_beyond_integer_range_pass_through() {
    assert_eq!(format_percentage("1e300"), "1e300");
    assert_eq!(format_percentage("-1e300"), "-1e300");
    assert_eq!(format_percentage("1e18"), "1000000000000000000%");
}

#[test]
fn italian_dates() {
    assert_eq!(format_italian_date(date(2025, 3, 5)), "5 Marzo 2025");
    assert_eq!(format_italian_date(date(2024, 12, 31)), "31 Dicembre 2024");
    assert_eq!(format_italian_date(date(2026, 1, 1)), "1 Gennaio 2026");
}

#[test]
fn validity_is_thirty_days_later() {
    assert_eq!(validity_date(date(2025, 1, 15)), date(2025, 2, 14));
    assert_eq!(validity_date(date(2024, 12, 10)), date(2025, 1, 9));
    assert_eq!(validity_date(date(2024, 2, 1)), date(2024, 3, 2));
}

#[test]
fn defaults() {
    assert_eq!(or_na(None), "N/A");
    assert_eq!(or_na(Some("x")), "x");
    assert_eq!(or_zero(None), "0");
    assert_eq!(or_zero(Some("1200")), "1200");
}

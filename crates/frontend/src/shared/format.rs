//! Display formatting for amounts and dates (es-MX conventions).

use chrono::{DateTime, NaiveDateTime};
use contracts::shared::dates::parse_iso_date;

/// Number with thousands separator `,` and the given decimals:
/// `1234.567` with 2 decimals is "1,234.57".
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    // "-0.00" reads badly
    let is_negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if is_negative { "-" } else { "" };
    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// "$1,234.56"; negatives as "-$1,234.56".
pub fn format_money(value: f64) -> String {
    let number = format_number(value, 2);
    if number == "-" {
        return number;
    }
    match number.strip_prefix('-') {
        Some(abs) => format!("-${}", abs),
        None => format!("${}", number),
    }
}

/// Percentage value (16.0 → "16.00%").
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value, 2))
}

/// Quantity: no decimals when whole, up to two otherwise.
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number(value, 0)
    } else {
        format_number(value, 2)
    }
}

/// ISO date or datetime to DD/MM/YYYY. Unparseable input comes back as is.
pub fn format_date(value: &str) -> String {
    match parse_iso_date(value) {
        Some(date) => date.format("%d/%m/%Y").to_string(),
        None => value.to_string(),
    }
}

/// ISO datetime to "DD/MM/YYYY HH:MM".
pub fn format_datetime(value: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.format("%d/%m/%Y %H:%M").to_string();
    }
    let trimmed = value.split('.').next().unwrap_or(value);
    match NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        Ok(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        Err(_) => format_date(value),
    }
}

/// Optional text for table cells.
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Today's local date as YYYY-MM-DD.
pub fn today_iso() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1234.56), "$1,234.56");
        assert_eq!(format_money(1234567.891), "$1,234,567.89");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(-1234.5), "-$1,234.50");
        assert_eq!(format_money(-0.001), "$0.00");
        assert_eq!(format_money(f64::NAN), "-");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234.567, 0), "1,235");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(100000.0, 1), "100,000.0");
        assert_eq!(format_number(-1234.0, 0), "-1,234");
        assert_eq!(format_quantity(3.0), "3");
        assert_eq!(format_quantity(2.5), "2.50");
        assert_eq!(format_percent(16.0), "16.00%");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15/03/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15/03/2024");
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date(""), "");
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26Z"), "15/03/2024 14:02");
        assert_eq!(format_datetime("2024-12-31T23:59:59.1234567"), "31/12/2024 23:59");
        assert_eq!(format_datetime("2024-12-31"), "31/12/2024");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some(" x ")), "x");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(None), "-");
    }
}

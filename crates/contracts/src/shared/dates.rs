//! Calendar dates as exchanged with the backend.
//!
//! Document dates travel either as `YYYY-MM-DD` or as a datetime
//! (`YYYY-MM-DDTHH:MM:SS[.fff][Z]`); only the date part is meaningful here.

use chrono::NaiveDate;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date part of an ISO date or datetime.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().split('T').next()?;
    NaiveDate::parse_from_str(date_part.trim(), ISO_DATE_FORMAT).ok()
}

/// `YYYY-MM-DD` for anything [`parse_iso_date`] accepts; other input is
/// returned trimmed.
pub fn normalize_iso_date(value: &str) -> String {
    match parse_iso_date(value) {
        Some(date) => format_iso_date(date),
        None => value.trim().to_string(),
    }
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Rejects an optional `later` date that falls before `start`.
/// Blank or unparseable `later` values are the caller's business.
pub fn ensure_not_before(start: &str, later: Option<&str>, message: &str) -> Result<(), String> {
    let (Some(start), Some(later)) = (parse_iso_date(start), later.and_then(parse_iso_date)) else {
        return Ok(());
    };
    if later < start {
        return Err(message.to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_and_datetime_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert_eq!(parse_iso_date("2024-06-01"), expected);
        assert_eq!(parse_iso_date("2024-06-01T00:00:00"), expected);
        assert_eq!(parse_iso_date(" 2024-06-01T18:45:10.123Z "), expected);
        assert_eq!(parse_iso_date("01/06/2024"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn normalizes_for_date_inputs() {
        assert_eq!(normalize_iso_date("2024-06-01T13:00:00"), "2024-06-01");
        assert_eq!(normalize_iso_date("2024-06-01"), "2024-06-01");
        assert_eq!(normalize_iso_date(" mañana "), "mañana");
    }

    #[test]
    fn ordering_ignores_time_of_day() {
        assert!(ensure_not_before("2024-06-01T09:30:00", Some("2024-06-01"), "x").is_ok());
        assert!(ensure_not_before("2024-06-01", Some("2024-06-02T00:00:00"), "x").is_ok());
        assert_eq!(
            ensure_not_before("2024-06-02T00:00:00", Some("2024-06-01"), "antes"),
            Err("antes".to_string())
        );
        assert!(ensure_not_before("2024-06-02", None, "x").is_ok());
    }
}

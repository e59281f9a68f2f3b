//! Conversions between text form fields and DTO values.
//!
//! Form view models keep every editable field as `RwSignal<String>` (what thaw
//! inputs bind to) and convert when loading a record or building the DTO.

use contracts::shared::dates::normalize_iso_date;
use leptos::prelude::*;

/// Empty or blank text becomes `None`.
pub fn opt_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn text_of(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Optional date as the `YYYY-MM-DD` a date input binds to.
pub fn date_text_of(value: &Option<String>) -> String {
    value.as_deref().map(normalize_iso_date).unwrap_or_default()
}

/// Parses an amount typed by the user; accepts "$" and thousands separators.
/// Anything unparseable is 0.
pub fn parse_amount(value: &str) -> f64 {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn parse_optional_amount(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        None
    } else {
        Some(parse_amount(value))
    }
}

pub fn parse_count(value: &str) -> i32 {
    value.trim().parse::<i32>().unwrap_or(0)
}

/// Text of an amount for an input: no trailing ".0", no thousands separators.
pub fn amount_text(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Value of a reference `<select>`: "" is no selection.
pub fn id_text(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

pub fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Labelled form row.
#[component]
pub fn FormField(
    label: &'static str,
    #[prop(optional)] required: bool,
    /// Spans the whole grid row
    #[prop(optional)]
    wide: bool,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="form__group" class:form__group--wide=wide>
            <label class="form__label">
                {label}
                {required.then_some(" *")}
            </label>
            {children()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_text() {
        assert_eq!(opt_text("  ".into()), None);
        assert_eq!(opt_text(" Norte ".into()), Some("Norte".into()));
        assert_eq!(text_of(&None), "");
    }

    #[test]
    fn dates_for_date_inputs() {
        assert_eq!(date_text_of(&Some("2024-06-30T00:00:00".into())), "2024-06-30");
        assert_eq!(date_text_of(&Some("2024-06-30".into())), "2024-06-30");
        assert_eq!(date_text_of(&None), "");
    }

    #[test]
    fn amounts() {
        assert_eq!(parse_amount("$1,250.50"), 1250.5);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_optional_amount(" "), None);
        assert_eq!(parse_optional_amount("0"), Some(0.0));
        assert_eq!(amount_text(1500.0), "1500");
        assert_eq!(amount_text(12.75), "12.75");
    }

    #[test]
    fn reference_ids() {
        assert_eq!(id_text(Some(7)), "7");
        assert_eq!(id_text(None), "");
        assert_eq!(parse_id("7"), Some(7));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count("x"), 0);
    }
}

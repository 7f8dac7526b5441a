//! Cell normalization.
//!
//! Spreadsheet exports store integers as floats (`5.0`), leave blanks as
//! missing values and write dates with `.` separators. Everything the
//! builder emits goes through [`normalize_text`] or [`normalize_date`], so
//! none of that leaks into the document.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static INTEGRAL_FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?\d+\.0$").expect("valid integral float pattern"));

/// Render a cell as output text.
///
/// Missing values become `""`. Integral floats lose their `.0` suffix.
/// Non-numeric text is returned as is.
///
/// # Example
/// ```
/// use mecgen::normalize_text;
/// use serde_json::{json, Value};
///
/// assert_eq!(normalize_text(&json!(5.0)), "5");
/// assert_eq!(normalize_text(&json!(5.5)), "5.5");
/// assert_eq!(normalize_text(&Value::Null), "");
/// ```
pub fn normalize_text(value: &Value) -> String {
    let text = match value {
        Value::Null => return String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    };
    strip_integral_suffix(text)
}

fn strip_integral_suffix(text: String) -> String {
    if INTEGRAL_FLOAT.is_match(&text) {
        text[..text.len() - 2].to_string()
    } else {
        text
    }
}

/// Render a cell as a `YYYY-MM-DD` date when it parses as one.
///
/// `.` is accepted as a separator. Anything that does not parse falls back
/// to [`normalize_text`] of the original value.
///
/// # Example
/// ```
/// use mecgen::{normalize_date, normalize_text};
/// use serde_json::json;
///
/// assert_eq!(normalize_date(&json!("2024.01.05")), "2024-01-05");
/// assert_eq!(normalize_date(&json!("not-a-date")), normalize_text(&json!("not-a-date")));
/// ```
pub fn normalize_date(value: &Value) -> String {
    let candidate = match value {
        Value::Null => return String::new(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let candidate = candidate.trim().replace('.', "-");
    match NaiveDate::parse_from_str(&candidate, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => normalize_text(value),
    }
}

/// True when the cell is missing or renders as empty text.
pub fn is_blank(value: &Value) -> bool {
    normalize_text(value).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integral_float_renders_as_integer() {
        assert_eq!(normalize_text(&json!(5.0)), "5");
        assert_eq!(normalize_text(&json!(5.5)), "5.5");
        assert_eq!(normalize_text(&json!(2024.0)), "2024");
        assert_eq!(normalize_text(&json!(-3.0)), "-3");
        assert_eq!(normalize_text(&json!("12.0")), "12");
    }

    #[test]
    fn test_missing_renders_empty() {
        assert_eq!(normalize_text(&Value::Null), "");
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!("")));
        assert!(!is_blank(&json!(0)));
    }

    #[test]
    fn test_non_numeric_text_untouched() {
        assert_eq!(normalize_text(&json!("v1.0")), "v1.0");
        assert_eq!(normalize_text(&json!("Season 1.0 recap")), "Season 1.0 recap");
        assert_eq!(normalize_text(&json!("5.00")), "5.00");
        assert_eq!(normalize_text(&json!(7)), "7");
    }

    #[test]
    fn test_normalize_text_is_idempotent() {
        for raw in ["5.0", "5", "abc", "", "1.0.0", "-0.0", " 3.0 ", "10.50"] {
            let once = normalize_text(&json!(raw));
            let twice = normalize_text(&json!(once.clone()));
            assert_eq!(once, twice, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_dotted_and_dashed_dates() {
        assert_eq!(normalize_date(&json!("2024.01.05")), "2024-01-05");
        assert_eq!(normalize_date(&json!("2024-01-05")), "2024-01-05");
        assert_eq!(normalize_date(&json!("2024.1.5")), "2024-01-05");
    }

    #[test]
    fn test_unparsable_dates_fall_back_to_text() {
        assert_eq!(normalize_date(&json!("not-a-date")), "not-a-date");
        assert_eq!(normalize_date(&json!("2024.13.40")), "2024.13.40");
        assert_eq!(normalize_date(&json!(20240105.0)), "20240105");
        assert_eq!(normalize_date(&Value::Null), "");
    }
}

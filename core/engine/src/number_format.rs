//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Display formatting for numeric and date values.
//! CONTEXT: Number columns render with two fixed decimals and thousands
//! grouping. Date columns hold ISO-8601 strings and render as a calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Decimal places used by number columns and numeric summaries.
pub const NUMBER_DECIMAL_PLACES: u8 = 2;

/// Calendar date pattern for date columns (month/day/year, unpadded).
pub const DATE_DISPLAY_FORMAT: &str = "%-m/%-d/%Y";

/// Format a number with two decimals and thousands grouping ("1,234.50").
pub fn format_number(value: f64) -> String {
    format_decimal(value, NUMBER_DECIMAL_PLACES, true)
}

/// Format a number with specified decimal places and optional thousands separator.
pub fn format_decimal(value: f64, decimal_places: u8, use_thousands_separator: bool) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places as usize);

    if use_thousands_separator {
        add_thousands_separator(&rounded)
    } else {
        rounded
    }
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let mut parts = s.splitn(2, '.');
    let integer_part = parts.next().unwrap_or("");
    let decimal_part = parts.next();

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    // "-0.00" reads as a negative zero; drop the sign.
    if negative && digits.chars().chain(decimal_part.unwrap_or("").chars()).any(|c| c != '0') {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

/// Parse an ISO-8601 date or date-time string.
/// Accepts RFC 3339 timestamps ("2023-01-05T10:30:00.000Z"), naive date-times
/// and plain dates ("2023-01-05"). Timestamps keep the date as written.
pub fn parse_iso_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Render an ISO-8601 string as a calendar date. Returns None when the string
/// does not parse.
pub fn format_date(s: &str) -> Option<String> {
    parse_iso_date(s).map(|dt| dt.format(DATE_DISPLAY_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_groups_thousands() {
        assert_eq!(format_number(1234567.891), "1,234,567.89");
        assert_eq!(format_number(100.0), "100.00");
        assert_eq!(format_number(0.0), "0.00");
        assert_eq!(format_number(-1500.5), "-1,500.50");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_number(-0.001), "0.00");
    }

    #[test]
    fn test_format_decimal_without_separator() {
        assert_eq!(format_decimal(1234.5, 1, false), "1234.5");
        assert_eq!(format_decimal(1234.4, 0, true), "1,234");
    }

    #[test]
    fn test_parse_iso_variants() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        for input in [
            "2023-01-05",
            "2023-01-05T10:30:00Z",
            "2023-01-05T10:30:00.123Z",
            "2023-01-05T10:30:00",
            "2023-01-05 10:30:00",
        ] {
            let parsed = parse_iso_date(input).unwrap_or_else(|| panic!("failed: {}", input));
            assert_eq!(parsed.date(), expected);
        }
        assert!(parse_iso_date("05/01/2023").is_none());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2023-02-01").as_deref(), Some("2/1/2023"));
        assert_eq!(format_date("2023-12-25T08:00:00.000Z").as_deref(), Some("12/25/2023"));
        assert_eq!(format_date("not a date"), None);
    }
}

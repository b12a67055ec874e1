use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

// Two-digit years first: `%Y` would otherwise read "24" as year 24.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d", "%m-%d-%Y"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%m/%d/%Y %H:%M:%S"];

/// Tolerant date parse. `None` for anything unrecognised.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Parses "1,234.56", "$99.99", "-50.00", "(75.25)" and friends.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    let (negative, s) = if s.starts_with('(') && s.ends_with(')') {
        (true, &s[1..s.len() - 1])
    } else {
        (false, s)
    };
    let s = s.replace([',', '$', ' '], "");
    if s.is_empty() {
        return None;
    }

    let dec = Decimal::from_str(&s).ok()?;
    Some(if negative { -dec } else { dec })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── parse_amount ──────────────────────────────────────────────────────────

    #[test]
    fn parse_amount_plain() {
        assert_eq!(parse_amount("123.45"), Some(Decimal::new(12345, 2)));
    }

    #[test]
    fn parse_amount_with_dollar_sign() {
        assert_eq!(parse_amount("$99.99"), Some(Decimal::new(9999, 2)));
    }

    #[test]
    fn parse_amount_with_commas() {
        assert_eq!(parse_amount("1,234.56"), Some(Decimal::new(123456, 2)));
    }

    #[test]
    fn parse_amount_negative() {
        assert_eq!(parse_amount("-50.00"), Some(Decimal::new(-5000, 2)));
        assert_eq!(parse_amount("-$14.05"), Some(Decimal::new(-1405, 2)));
    }

    #[test]
    fn parse_amount_accounting_parens() {
        assert_eq!(parse_amount("(75.25)"), Some(Decimal::new(-7525, 2)));
    }

    #[test]
    fn parse_amount_whole_number() {
        assert_eq!(parse_amount(" 100 "), Some(Decimal::from(100)));
    }

    #[test]
    fn parse_amount_invalid() {
        assert_eq!(parse_amount("not_a_number"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("$"), None);
    }

    // ── parse_date ────────────────────────────────────────────────────────────

    #[test]
    fn parse_date_iso() {
        assert_eq!(parse_date("2024-01-15"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn parse_date_us_slash() {
        assert_eq!(parse_date("01/15/2024"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn parse_date_two_digit_year() {
        assert_eq!(parse_date("01/15/24"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn parse_date_with_time() {
        assert_eq!(parse_date("2024-01-15 10:30:00"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T10:30:00"), Some(date(2024, 1, 15)));
        assert_eq!(parse_date("2024-01-15T10:30:00-05:00"), Some(date(2024, 1, 15)));
    }

    #[test]
    fn parse_date_invalid() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("13/45/2024"), None);
    }
}

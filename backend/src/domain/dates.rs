//! Calendar date normalization.
//!
//! Users type dates day-first (`10-10-2025`, `2/8/25`); storage and the HTTP
//! API use the canonical `YYYY-MM-DD` form. The two must round-trip for every
//! valid date.

use chrono::NaiveDate;

use crate::domain::error::HuiError;

/// Canonical persistence format
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Format shown to users
pub const USER_FORMAT: &str = "%d-%m-%Y";

/// Parse a day-month-year date using `-` or `/` as separator.
///
/// A year below 100 is promoted by adding 2000 (`10-10-25` is 2025-10-10).
/// The triple must name a real calendar day.
pub fn parse_user_date(input: &str) -> Result<NaiveDate, HuiError> {
    let normalized = input.trim().replace('/', "-");
    let parts: Vec<&str> = normalized.split('-').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(HuiError::parse(input, "expected DD-MM-YYYY"));
    }

    let mut numbers = [0u32; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part
            .parse::<u32>()
            .map_err(|_| HuiError::parse(input, format!("'{}' is not a number", part)))?;
    }
    let [day, month, mut year] = numbers;
    if year < 100 {
        year += 2000;
    }

    let year = i32::try_from(year).map_err(|_| HuiError::parse(input, "year is out of range"))?;
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| HuiError::parse(input, "not a valid calendar date"))
}

/// Parse the canonical `YYYY-MM-DD` form
pub fn parse_iso_date(input: &str) -> Result<NaiveDate, HuiError> {
    NaiveDate::parse_from_str(input.trim(), ISO_FORMAT)
        .map_err(|e| HuiError::parse(input, format!("expected YYYY-MM-DD ({})", e)))
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn format_user_date(date: NaiveDate) -> String {
    date.format(USER_FORMAT).to_string()
}

/// Accept either the canonical form or the day-first user form.
///
/// A leading four-digit component selects the canonical form.
pub fn parse_any_date(input: &str) -> Result<NaiveDate, HuiError> {
    let leading_digits = input
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if leading_digits == 4 {
        parse_iso_date(input)
    } else {
        parse_user_date(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_date_four_digit_year() {
        let date = parse_user_date("10-10-2025").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 10, 10).unwrap());
    }

    #[test]
    fn test_parse_user_date_two_digit_year_is_promoted() {
        assert_eq!(
            parse_user_date("10-10-25").unwrap(),
            parse_user_date("10-10-2025").unwrap()
        );
        assert_eq!(
            parse_user_date("2/8/25").unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 2).unwrap()
        );
    }

    #[test]
    fn test_parse_user_date_rejects_impossible_dates() {
        assert!(matches!(parse_user_date("31-02-2025"), Err(HuiError::Parse { .. })));
        assert!(matches!(parse_user_date("01-13-2025"), Err(HuiError::Parse { .. })));
        assert!(matches!(parse_user_date("29-02-2025"), Err(HuiError::Parse { .. })));
        assert!(parse_user_date("29-02-2024").is_ok());
    }

    #[test]
    fn test_parse_user_date_rejects_garbage() {
        assert!(parse_user_date("").is_err());
        assert!(parse_user_date("10-10").is_err());
        assert!(parse_user_date("aa-10-2025").is_err());
        assert!(parse_user_date("1-2-3-4").is_err());
    }

    #[test]
    fn test_iso_and_user_forms_round_trip() {
        let dates = [
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            NaiveDate::from_ymd_opt(2030, 12, 31).unwrap(),
        ];
        for date in dates {
            assert_eq!(parse_iso_date(&format_iso_date(date)).unwrap(), date);
            assert_eq!(parse_user_date(&format_user_date(date)).unwrap(), date);
        }
    }

    #[test]
    fn test_parse_any_date_accepts_both_forms() {
        let expected = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        assert_eq!(parse_any_date("2025-10-10").unwrap(), expected);
        assert_eq!(parse_any_date("10/10/2025").unwrap(), expected);
        assert_eq!(parse_any_date("10-10-25").unwrap(), expected);
    }
}

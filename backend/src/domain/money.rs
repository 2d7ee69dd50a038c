//! Money normalization and display.
//!
//! Amounts are whole VND held in `i64`. Input arrives as the shorthand people
//! type in chat ("2tr", "250k", "1.000.000"); output is grouped with commas.

use crate::domain::error::HuiError;

const MILLION: i64 = 1_000_000;
const THOUSAND: i64 = 1_000;

/// Unit suffixes, longest first so that `ngan` wins over `n` and `trieu` over `t`.
const UNIT_SUFFIXES: &[(&str, i64)] = &[
    ("triệu", MILLION),
    ("trieu", MILLION),
    ("nghìn", THOUSAND),
    ("nghin", THOUSAND),
    ("ngàn", THOUSAND),
    ("ngan", THOUSAND),
    ("tr", MILLION),
    ("m", MILLION),
    ("t", MILLION),
    ("k", THOUSAND),
    ("n", THOUSAND),
];

/// Parse a user-supplied amount into whole VND.
///
/// Separators (`,`, `_`, whitespace) are dropped. A plain integer is taken
/// as-is; otherwise a decimal prefix followed by a unit suffix is scaled
/// (`tr`/`m`/`t` = million, `k`/`n` = thousand). Fractions of a đồng are
/// truncated.
pub fn parse_money(input: &str) -> Result<i64, HuiError> {
    let cleaned: String = input
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(HuiError::parse(input, "empty amount"));
    }

    if cleaned.chars().all(|c| c.is_ascii_digit()) {
        return scale_decimal(&cleaned, 1, input);
    }

    for (suffix, multiplier) in UNIT_SUFFIXES {
        if let Some(prefix) = cleaned.strip_suffix(suffix) {
            if prefix.is_empty() {
                return Err(HuiError::parse(input, "missing number before unit"));
            }
            return scale_decimal(prefix, *multiplier, input);
        }
    }

    if is_dot_grouped(&cleaned) {
        return scale_decimal(&cleaned.replace('.', ""), 1, input);
    }

    scale_decimal(&cleaned, 1, input)
}

/// `1.000.000` style grouping: every `.` followed by exactly three digits
fn is_dot_grouped(value: &str) -> bool {
    let mut groups = value.split('.');
    let head = match groups.next() {
        Some(head) => head,
        None => return false,
    };
    if head.is_empty() || head.len() > 3 || !head.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let mut tail_count = 0;
    for group in groups {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        tail_count += 1;
    }
    tail_count > 0
}

/// Multiply a non-negative decimal string by `multiplier` using integer
/// arithmetic, truncating the fractional remainder.
fn scale_decimal(number: &str, multiplier: i64, input: &str) -> Result<i64, HuiError> {
    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(HuiError::parse(input, "missing number"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(HuiError::parse(input, "unrecognized amount"));
    }

    let too_large = || HuiError::parse(input, "amount is too large");
    let multiplier = i128::from(multiplier);

    let whole_value: i128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| too_large())?
    };
    let mut total = whole_value.checked_mul(multiplier).ok_or_else(too_large)?;

    // Digits past 18 cannot contribute a whole đồng at any supported multiplier
    let fraction = &fraction[..fraction.len().min(18)];
    if !fraction.is_empty() {
        let fraction_value: i128 = fraction.parse().map_err(|_| too_large())?;
        let scale = 10i128.pow(fraction.len() as u32);
        total += fraction_value * multiplier / scale;
    }

    i64::try_from(total).map_err(|_| too_large())
}

/// `rate` percent of `amount`, rounded half-to-even to a whole đồng
pub fn percent_of(amount: i64, rate: f64) -> i64 {
    (amount as f64 * rate / 100.0).round_ties_even() as i64
}

/// Group thousands with commas: `101200000` → `101,200,000`
pub fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Grouped amount with the currency label
pub fn format_vnd_label(amount: i64) -> String {
    format!("{} VND", format_vnd(amount))
}

/// ROI ratio as a percentage with two decimals: `0.1234` → `12.34%`
pub fn format_roi(roi: f64) -> String {
    format!("{:.2}%", roi * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_money_shorthand() {
        assert_eq!(parse_money("1tr").unwrap(), 1_000_000);
        assert_eq!(parse_money("250k").unwrap(), 250_000);
        assert_eq!(parse_money("2.5tr").unwrap(), 2_500_000);
        assert_eq!(parse_money("1000000").unwrap(), 1_000_000);
        assert_eq!(parse_money("1000n").unwrap(), 1_000_000);
        assert_eq!(parse_money("10m").unwrap(), 10_000_000);
        assert_eq!(parse_money("3t").unwrap(), 3_000_000);
    }

    #[test]
    fn test_parse_money_is_case_insensitive_and_accepts_vietnamese_units() {
        assert_eq!(parse_money("10TR").unwrap(), 10_000_000);
        assert_eq!(parse_money("2 triệu").unwrap(), 2_000_000);
        assert_eq!(parse_money("2 Trieu").unwrap(), 2_000_000);
        assert_eq!(parse_money("500 nghìn").unwrap(), 500_000);
        assert_eq!(parse_money("500ngan").unwrap(), 500_000);
    }

    #[test]
    fn test_parse_money_strips_grouping() {
        assert_eq!(parse_money("1,000,000").unwrap(), 1_000_000);
        assert_eq!(parse_money("1_000_000").unwrap(), 1_000_000);
        assert_eq!(parse_money(" 1 000 000 ").unwrap(), 1_000_000);
        assert_eq!(parse_money("1.000.000").unwrap(), 1_000_000);
        assert_eq!(parse_money("2.500").unwrap(), 2_500);
    }

    #[test]
    fn test_parse_money_fractions_are_exact_and_truncated() {
        assert_eq!(parse_money("2.3tr").unwrap(), 2_300_000);
        assert_eq!(parse_money("0.1tr").unwrap(), 100_000);
        assert_eq!(parse_money(".5k").unwrap(), 500);
        assert_eq!(parse_money("1.2345k").unwrap(), 1_234);
        assert_eq!(parse_money("1500.75").unwrap(), 1_500);
    }

    #[test]
    fn test_parse_money_rejects_invalid_input() {
        for input in ["", "abc", "5x", "-5k", "tr", "1.2.3tr", "1e6", "k5", "5kk"] {
            match parse_money(input) {
                Err(HuiError::Parse { input: offending, .. }) => assert_eq!(offending, input),
                other => panic!("expected parse error for {:?}, got {:?}", input, other),
            }
        }
    }

    #[test]
    fn test_parse_money_rejects_overflow() {
        assert!(parse_money("99999999999999999999999").is_err());
        assert!(parse_money("99999999999999tr").is_err());
    }

    #[test]
    fn test_percent_of_rounds_half_to_even() {
        assert_eq!(percent_of(10_000_000, 5.0), 500_000);
        assert_eq!(percent_of(10_000_000, 8.0), 800_000);
        assert_eq!(percent_of(10_000_001, 50.0), 5_000_000);
        assert_eq!(percent_of(10_000_003, 50.0), 5_000_002);
        assert_eq!(percent_of(1_000, 0.0), 0);
    }

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(0), "0");
        assert_eq!(format_vnd(999), "999");
        assert_eq!(format_vnd(1_000), "1,000");
        assert_eq!(format_vnd(101_200_000), "101,200,000");
        assert_eq!(format_vnd(-2_500_000), "-2,500,000");
        assert_eq!(format_vnd_label(250_000), "250,000 VND");
    }

    #[test]
    fn test_format_roi() {
        assert_eq!(format_roi(0.1234), "12.34%");
        assert_eq!(format_roi(10.12), "1012.00%");
        assert_eq!(format_roi(-0.5), "-50.00%");
    }
}

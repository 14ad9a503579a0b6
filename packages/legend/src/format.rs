//! en-US number formatting for legend labels and popups.

use landslide_map_landslide_models::MISSING;

/// Formats `value` as a whole number with comma thousands separators,
/// rounding half away from zero (`1234.5` → `"1,235"`).
///
/// Non-finite values render as [`MISSING`].
#[must_use]
pub fn grouped(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let rounded = value.round();
    let digits = group_digits(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-{digits}")
    } else {
        digits
    }
}

/// Formats `value` as US dollars with no decimal places
/// (`1500000` → `"$1,500,000"`, `-5` → `"-$5"`).
///
/// Non-finite values render as [`MISSING`].
#[must_use]
pub fn currency(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    let rounded = value.round();
    let digits = group_digits(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-${digits}")
    } else {
        format!("${digits}")
    }
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(grouped(0.0), "0");
        assert_eq!(grouped(999.0), "999");
        assert_eq!(grouped(1000.0), "1,000");
        assert_eq!(grouped(1_234_567.0), "1,234,567");
        assert_eq!(grouped(-1_234.0), "-1,234");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(grouped(2.5), "3");
        assert_eq!(grouped(1_234.49), "1,234");
        assert_eq!(grouped(-0.4), "0");
        assert_eq!(currency(999.5), "$1,000");
    }

    #[test]
    fn formats_dollars() {
        assert_eq!(currency(500_000.0), "$500,000");
        assert_eq!(currency(22_500_000.0), "$22,500,000");
        assert_eq!(currency(-5.0), "-$5");
        assert_eq!(currency(0.0), "$0");
    }

    #[test]
    fn non_finite_is_missing() {
        assert_eq!(grouped(f64::NAN), MISSING);
        assert_eq!(currency(f64::INFINITY), MISSING);
    }
}

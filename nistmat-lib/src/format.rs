//! Fixed-precision number formatting.
//!
//! Numbers are written like C's `%g`: rounded to a bounded number of
//! significant digits, in plain decimal when the exponent lies in
//! `[-4, precision)`, in scientific notation otherwise, and always without
//! trailing zeros. The same value and precision always yield the same text.

/// Format `value` with `precision` significant digits.
pub fn format_general(value: f64, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let precision = precision.max(1);
    // Rounding to `precision` digits can bump the exponent (9.9999 -> 1e1),
    // so read it back from the rounded scientific form.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -4 || exponent >= precision as i32 {
        format!("{}e{}", trim_trailing_zeros(mantissa), exponent)
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

/// Format a fraction in `[0, 1]` as a percentage, e.g. `0.001` -> `"0.1"`.
pub fn format_percent(fraction: f64, precision: usize) -> String {
    format_general(fraction * 100.0, precision)
}

fn trim_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_drop_fraction() {
        assert_eq!(format_general(2.0, 4), "2");
        assert_eq!(format_general(100.0, 4), "100");
        assert_eq!(format_general(-3.0, 6), "-3");
    }

    #[test]
    fn test_decimals() {
        assert_eq!(format_general(1.4, 4), "1.4");
        assert_eq!(format_general(1.03, 6), "1.03");
        assert_eq!(format_general(293.15, 6), "293.15");
        assert_eq!(format_general(0.001, 6), "0.001");
    }

    #[test]
    fn test_rounds_to_precision() {
        assert_eq!(format_general(1.00782503223, 6), "1.00783");
        assert_eq!(format_general(5.000000000000001, 4), "5");
        assert_eq!(format_general(0.30000000000000004, 6), "0.3");
        assert_eq!(format_general(9.99999, 4), "10");
    }

    #[test]
    fn test_scientific_outside_display_range() {
        assert_eq!(format_general(1.0e-25, 6), "1e-25");
        assert_eq!(format_general(8.3748e-8, 6), "8.3748e-8");
        assert_eq!(format_general(1234567.0, 6), "1.23457e6");
        assert_eq!(format_general(12344.0, 4), "1.234e4");
    }

    #[test]
    fn test_zero() {
        assert_eq!(format_general(0.0, 4), "0");
        assert_eq!(format_general(-0.0, 4), "0");
        assert_eq!(format_percent(0.0, 4), "0");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(0.01, 4), "1");
        assert_eq!(format_percent(0.05, 4), "5");
        assert_eq!(format_percent(0.1, 4), "10");
        assert_eq!(format_percent(0.001, 4), "0.1");
        assert_eq!(format_percent(0.5, 4), "50");
    }
}

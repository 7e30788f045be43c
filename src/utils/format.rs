/// Format an integer with comma thousands separators: `1234567` -> `"1,234,567"`
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut output = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        output.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            output.push(',');
        }
        output.push(ch);
    }

    output
}

/// Y-axis tick label: whole won, grouped, never in scientific notation
pub fn format_axis_price(value: &f64) -> String {
    group_thousands(value.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(72000), "72,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-2000), "-2,000");
        assert_eq!(group_thousands(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_format_axis_price_has_no_exponent() {
        assert_eq!(format_axis_price(&1234567.0), "1,234,567");
        assert_eq!(format_axis_price(&71999.99999), "72,000");
        assert!(!format_axis_price(&1.0e9).contains('e'));
    }
}

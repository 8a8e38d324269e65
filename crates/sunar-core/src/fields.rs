//! # Numeric Field Policy
//!
//! How free-text numeric fields become numbers, and how numbers become
//! display text.
//!
//! The editor's numeric fields are plain text inputs. The recovery policy
//! for unparseable text is to substitute zero, silently - no dialog, no
//! error, the totals simply compute as if the field were empty. That is a
//! deliberate (if blunt) simplicity choice the shop staff rely on;
//! tightening it would change visible behavior, so it is documented here
//! rather than "fixed".

/// Parses a numeric text field. Unparseable or empty text becomes `0.0`,
/// silently. Negative numbers pass through unvalidated.
///
/// ## Example
/// ```rust
/// use sunar_core::fields::parse_amount;
///
/// assert_eq!(parse_amount("1340"), 1340.0);
/// assert_eq!(parse_amount(" 12.5 "), 12.5);
/// assert_eq!(parse_amount("abc"), 0.0);
/// assert_eq!(parse_amount(""), 0.0);
/// ```
pub fn parse_amount(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

/// Formats a monetary or weight amount for display: two decimals, no
/// thousands separator. Shared by the editor totals and the PDF so the two
/// can never disagree.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_numbers() {
        assert_eq!(parse_amount("1340"), 1340.0);
        assert_eq!(parse_amount("0.45"), 0.45);
        assert_eq!(parse_amount("  85.00 "), 85.0);
    }

    #[test]
    fn test_parse_failure_is_zero_silently() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("12,5"), 0.0);
        assert_eq!(parse_amount("1.2.3"), 0.0);
    }

    #[test]
    fn test_parse_negative_passes_through() {
        assert_eq!(parse_amount("-42"), -42.0);
    }

    #[test]
    fn test_format_two_decimals() {
        assert_eq!(format_amount(688.0), "688.00");
        assert_eq!(format_amount(643.5), "643.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-220.0), "-220.00");
    }
}

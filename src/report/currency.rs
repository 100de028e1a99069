//! @ai:module:intent Dollar formatting for reports and terminal output
//! @ai:module:layer presentation
//! @ai:module:public_api format_currency, format_signed_currency, format_cents
//! @ai:module:stateless true

/// @ai:intent Format a value as en-US dollars with up to two decimals
/// @ai:example 1234.5 -> "$1,234.5"
/// @ai:example -500.0 -> "-$500"
/// @ai:edge_cases non-finite values format as "$0"
/// @ai:effects pure
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "$0".to_string();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let mut out = group_thousands(cents / 100);
    let fraction = cents % 100;

    if fraction != 0 {
        let digits = format!("{:02}", fraction);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }

    if value < 0.0 && cents != 0 {
        format!("-${}", out)
    } else {
        format!("${}", out)
    }
}

/// @ai:intent Format with an explicit sign, as change orders are shown
/// @ai:example 1500.0 -> "+$1,500"
/// @ai:effects pure
pub fn format_signed_currency(value: f64) -> String {
    if value.is_finite() && value < 0.0 {
        format_currency(value)
    } else {
        format!("+{}", format_currency(value))
    }
}

/// @ai:intent Format with exactly two decimals, as travel costs are shown
/// @ai:effects pure
pub fn format_cents(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("${:.2}", value)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(350.5), "$350.5");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(-2500.25), "-$2,500.25");
        assert_eq!(format_currency(f64::NAN), "$0");
    }

    #[test]
    fn test_format_signed_currency() {
        assert_eq!(format_signed_currency(1500.0), "+$1,500");
        assert_eq!(format_signed_currency(-500.0), "-$500");
        assert_eq!(format_signed_currency(0.0), "+$0");
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(16.0), "$16.00");
        assert_eq!(format_cents(f64::INFINITY), "$0.00");
    }
}

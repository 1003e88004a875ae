//! Display formatting in the Indian numbering convention.

pub const RUPEE_SYMBOL: &str = "₹";
pub const CRORE_VALUE: f64 = 10_000_000.0;
pub const LAKH_VALUE: f64 = 100_000.0;
pub const THOUSAND_VALUE: f64 = 1_000.0;

/// Compact amount: `₹1.25 Cr`, `₹12.50 L`, `₹4.50k`, `₹500`.
pub fn format_indian_currency(amount: f64) -> String {
    if amount.is_nan() {
        return format!("{RUPEE_SYMBOL}0");
    }

    let abs_amount = amount.abs();
    let formatted = if abs_amount >= CRORE_VALUE {
        format!("{RUPEE_SYMBOL}{} Cr", to_fixed(abs_amount / CRORE_VALUE, 2))
    } else if abs_amount >= LAKH_VALUE {
        format!("{RUPEE_SYMBOL}{} L", to_fixed(abs_amount / LAKH_VALUE, 2))
    } else if abs_amount >= THOUSAND_VALUE {
        format!("{RUPEE_SYMBOL}{}k", to_fixed(abs_amount / THOUSAND_VALUE, 2))
    } else {
        format!("{RUPEE_SYMBOL}{}", to_fixed(abs_amount, 0))
    };

    if amount < 0.0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// Whole-rupee amount with lakh/crore digit grouping: `₹1,03,38,284`.
pub fn format_indian_currency_full(amount: f64) -> String {
    if amount.is_nan() {
        return format!("{RUPEE_SYMBOL}0");
    }
    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}{RUPEE_SYMBOL}∞");
    }

    let digits = to_fixed(amount.abs(), 0);
    let grouped = group_indian_digits(&digits);
    if amount < 0.0 {
        format!("-{RUPEE_SYMBOL}{grouped}")
    } else {
        format!("{RUPEE_SYMBOL}{grouped}")
    }
}

pub fn format_percentage(value: f64) -> String {
    if value.is_nan() {
        return "0%".to_string();
    }
    format!("{}%", to_fixed(value, 1))
}

/// Goal-progress label: one decimal, with a whole number shown bare
/// (`"68.1%"`, `"68%"`, `"100%"`).
pub fn format_progress(percent: f64) -> String {
    if percent.is_nan() {
        return "0%".to_string();
    }
    let fixed = to_fixed(percent, 1);
    let shown = fixed.strip_suffix(".0").unwrap_or(&fixed);
    format!("{shown}%")
}

pub fn format_years(years: i64) -> String {
    if years == 1 {
        "1 year".to_string()
    } else {
        format!("{years} years")
    }
}

/// Fixed-point rendering where exact halves round away from zero.
fn to_fixed(value: f64, digits: i32) -> String {
    let scale = 10_f64.powi(digits);
    let scaled = (value.abs() * scale).round();
    let sign = if value < 0.0 && scaled != 0.0 { "-" } else { "" };

    if digits <= 0 {
        return format!("{sign}{scaled:.0}");
    }

    let whole = (scaled / scale).trunc();
    let frac = scaled - whole * scale;
    format!(
        "{sign}{whole:.0}.{frac:0width$.0}",
        width = digits as usize
    )
}

/// Groups the last three digits, then pairs: `12345678` -> `1,23,45,678`.
fn group_indian_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_uses_lakh_and_crore_breakpoints() {
        assert_eq!(format_indian_currency(1_250_000.0), "₹12.50 L");
        assert_eq!(format_indian_currency(12_500_000.0), "₹1.25 Cr");
        assert_eq!(format_indian_currency(500.0), "₹500");
        assert_eq!(format_indian_currency(4_500.0), "₹4.50k");
        assert_eq!(format_indian_currency(100_000.0), "₹1.00 L");
        assert_eq!(format_indian_currency(99_999.0), "₹100.00k");
    }

    #[test]
    fn compact_prefixes_sign_before_symbol() {
        assert_eq!(format_indian_currency(-1_250_000.0), "-₹12.50 L");
        assert_eq!(format_indian_currency(-500.0), "-₹500");
    }

    #[test]
    fn compact_rounds_small_amounts_to_whole_rupees() {
        assert_eq!(format_indian_currency(0.0), "₹0");
        assert_eq!(format_indian_currency(499.5), "₹500");
        assert_eq!(format_indian_currency(25_294.36), "₹25.29k");
    }

    #[test]
    fn nan_formats_as_zero() {
        assert_eq!(format_indian_currency(f64::NAN), "₹0");
        assert_eq!(format_indian_currency_full(f64::NAN), "₹0");
        assert_eq!(format_percentage(f64::NAN), "0%");
    }

    #[test]
    fn full_groups_digits_the_indian_way() {
        assert_eq!(format_indian_currency_full(0.0), "₹0");
        assert_eq!(format_indian_currency_full(999.0), "₹999");
        assert_eq!(format_indian_currency_full(1_000.0), "₹1,000");
        assert_eq!(format_indian_currency_full(1_250_000.0), "₹12,50,000");
        assert_eq!(format_indian_currency_full(103_382_841.11), "₹10,33,82,841");
        assert_eq!(format_indian_currency_full(70_399_282.66), "₹7,03,99,283");
    }

    #[test]
    fn full_places_minus_before_symbol() {
        assert_eq!(format_indian_currency_full(-1_250_000.0), "-₹12,50,000");
    }

    #[test]
    fn percentage_and_years() {
        assert_eq!(format_percentage(68.096), "68.1%");
        assert_eq!(format_percentage(100.0), "100.0%");
        assert_eq!(format_progress(68.096), "68.1%");
        assert_eq!(format_progress(68.0), "68%");
        assert_eq!(format_progress(99.96), "100%");
        assert_eq!(format_progress(100.0), "100%");
        assert_eq!(format_progress(f64::NAN), "0%");
        assert_eq!(format_years(1), "1 year");
        assert_eq!(format_years(0), "0 years");
        assert_eq!(format_years(30), "30 years");
    }

    #[test]
    fn group_handles_each_width() {
        assert_eq!(group_indian_digits("1234"), "1,234");
        assert_eq!(group_indian_digits("12345"), "12,345");
        assert_eq!(group_indian_digits("123456"), "1,23,456");
        assert_eq!(group_indian_digits("12345678"), "1,23,45,678");
    }
}

//! Formatting and input helpers for the teller console

use rust_decimal::Decimal;

/// Length of the short code printed on teller receipts
pub const REFERENCE_CODE_LEN: usize = 6;

/// Format an integer string with thousands separators
pub fn format_number<T: ToString>(n: T) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };

    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

/// Money amount with two decimals and thousands separators, e.g. `$1,500.25`
pub fn format_amount(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, format_number(whole), cents)
}

/// Optional amount; missing values print as `-`
pub fn format_optional_amount(amount: Option<Decimal>) -> String {
    amount.map(format_amount).unwrap_or_else(|| "-".to_string())
}

/// Whether the input is a six-digit receipt code
pub fn is_reference_code(input: &str) -> bool {
    input.len() == REFERENCE_CODE_LEN && input.bytes().all(|b| b.is_ascii_digit())
}

/// Hide all but the last four characters of an account or ID number
pub fn mask_identifier(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return value.to_string();
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

// Input parsing and display formatting helpers

/// Reads a recharge amount the way a browser number box is usually read:
/// leading whitespace and sign, then as many digits as there are.
/// Anything that is not a positive whole amount yields `None`.
pub fn parse_amount(raw: &str) -> Option<u64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: u64 = digits[..end].parse().ok()?;
    if negative || value == 0 {
        return None;
    }
    Some(value)
}

pub fn format_currency(amount: u64) -> String {
    format!("¥{amount}")
}

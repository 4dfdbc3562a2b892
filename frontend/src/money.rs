use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmountError {
    #[error("Please enter an amount.")]
    Empty,

    #[error("Amount must be a number.")]
    NotANumber,

    #[error("Amount is too large.")]
    OutOfRange,
}

/// Converts a decimal amount typed by the user (e.g. `"12.34"`) into minor
/// units (`1234`), rounding to the nearest cent.
///
/// Zero and negative amounts are accepted; the server decides whether they
/// make sense.
pub fn parse_amount(input: &str) -> Result<i64, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| AmountError::NotANumber)?;
    if !value.is_finite() {
        return Err(AmountError::NotANumber);
    }

    let minor = (value * 100.0).round();
    // 2^63 itself would saturate to i64::MAX, a different amount.
    if minor.abs() >= i64::MAX as f64 {
        return Err(AmountError::OutOfRange);
    }
    Ok(minor as i64)
}

fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats minor units as dollars with thousands separators, e.g.
/// `123456` => `"$1,234.56"` and `-500` => `"-$5.00"`.
pub fn format_currency(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    format!("{}${}.{:02}", sign, format_with_commas(abs / 100), abs % 100)
}

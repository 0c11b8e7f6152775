use std::fmt;

/// Monetary amounts are signed `f64` values: negative for expenses, positive
/// for income. Amounts are stored as plain JSON numbers so documents written
/// by older exports round-trip unchanged through serde.
pub type Amount = f64;

/// Format an amount as a human-readable currency string.
/// Example: 50.0 -> "50.00", -12.34 -> "-12.34"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50.0, "12,5" -> 12.5 (comma accepted as decimal separator)
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim().replace(',', ".");
    let value: f64 = input.parse().map_err(|_| ParseAmountError::InvalidFormat)?;
    if !value.is_finite() {
        return Err(ParseAmountError::InvalidFormat);
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

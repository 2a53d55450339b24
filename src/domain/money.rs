use std::fmt;

/// Amounts are stored as SQLite REAL, in a single implicit currency.
pub type Amount = f64;

/// Format an amount as a human-readable string with two decimals.
/// Example: 50.0 -> "50.00", 1234.5 -> "1234.50"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse user input into an amount.
/// Example: "50" -> 50.0, "12.5" -> 12.5, " 3.20 " -> 3.2
///
/// Only the shape of the number is checked here. Sign and zero checks belong
/// to `NewExpense::validate`.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }

    let amount: Amount = input.parse().map_err(|_| ParseAmountError::InvalidFormat)?;
    if !amount.is_finite() {
        return Err(ParseAmountError::NotFinite);
    }

    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
    NotFinite,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is required"),
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::NotFinite => write!(f, "amount must be a finite number"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{format_amount, Amount};

pub type ExpenseId = i64;

/// Date format used for the persisted `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single persisted ledger entry.
///
/// `date` is always set for rows written by this crate, but the column is
/// nullable and older databases may hold rows without a readable date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: Amount,
    pub category: String,
    pub note: String,
    pub date: Option<NaiveDate>,
}

impl Expense {
    /// The date as `YYYY-MM-DD`, or an empty string when it is missing.
    pub fn date_str(&self) -> String {
        self.date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// The caller-supplied part of an expense. The id and date are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Amount,
    pub category: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvalidExpense {
    Amount(String),
    BlankCategory,
}

impl NewExpense {
    pub fn new(amount: Amount, category: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            note: String::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Reject input that should never reach the store: a non-finite or
    /// non-positive amount, or a blank category.
    pub fn validate(&self) -> Result<(), InvalidExpense> {
        if !self.amount.is_finite() {
            return Err(InvalidExpense::Amount(
                "Amount must be a finite number".to_string(),
            ));
        }
        if self.amount <= 0.0 {
            return Err(InvalidExpense::Amount(format!(
                "Amount must be positive, got {}",
                format_amount(self.amount)
            )));
        }
        if self.category.trim().is_empty() {
            return Err(InvalidExpense::BlankCategory);
        }
        Ok(())
    }
}

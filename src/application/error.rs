use thiserror::Error;

use crate::domain::{ExpenseId, InvalidExpense};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Category is required")]
    InvalidCategory,

    #[error("Storage unavailable: {0:#}")]
    StorageUnavailable(#[from] anyhow::Error),
}

impl From<InvalidExpense> for AppError {
    fn from(err: InvalidExpense) -> Self {
        match err {
            InvalidExpense::Amount(msg) => AppError::InvalidAmount(msg),
            InvalidExpense::BlankCategory => AppError::InvalidCategory,
        }
    }
}

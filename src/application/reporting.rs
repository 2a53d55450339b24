use serde::{Deserialize, Serialize};

use crate::domain::Amount;

/// Sum of all expenses sharing the same `YYYY-MM` prefix of their date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: String,
    pub total: Amount,
}

/// Sum of all expenses sharing the same category string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
}

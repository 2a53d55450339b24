use std::sync::Arc;

use crate::domain::{Clock, Expense, ExpenseId, NewExpense, SystemClock};
use crate::storage::Repository;

use super::{AppError, CategoryTotal, MonthlyTotal};

/// Application service providing high-level operations for the expense ledger.
/// This is the primary interface for any client (CLI, interactive menu, export).
pub struct ExpenseService {
    repo: Repository,
    clock: Arc<dyn Clock>,
}

impl ExpenseService {
    /// Create a new expense service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self {
            repo,
            clock: Arc::new(SystemClock),
        }
    }

    /// Open the database at the given path, creating the file and the
    /// expenses table if they don't exist yet.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        tracing::info!(database = database_path, "expense store ready");
        Ok(Self::new(repo))
    }

    /// Replace the source of creation dates.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Record a new expense dated today.
    pub async fn add_expense(&self, expense: NewExpense) -> Result<Expense, AppError> {
        expense.validate()?;

        let date = self.clock.today();
        let id = self.repo.insert_expense(&expense, date).await?;
        tracing::debug!(
            id,
            amount = expense.amount,
            category = %expense.category,
            %date,
            "expense added"
        );

        Ok(Expense {
            id,
            amount: expense.amount,
            category: expense.category,
            note: expense.note,
            date: Some(date),
        })
    }

    /// Get a single expense by id.
    pub async fn get_expense(&self, id: ExpenseId) -> Result<Expense, AppError> {
        self.repo
            .get_expense(id)
            .await?
            .ok_or(AppError::ExpenseNotFound(id))
    }

    /// List every expense, newest first.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>, AppError> {
        Ok(self.repo.list_expenses().await?)
    }

    /// Delete an expense. Deleting an id that doesn't exist succeeds and
    /// returns `false`.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<bool, AppError> {
        let removed = self.repo.delete_expense(id).await?;
        if removed {
            tracing::debug!(id, "expense deleted");
        } else {
            tracing::debug!(id, "no expense to delete");
        }
        Ok(removed)
    }

    /// Totals per month, latest month first.
    pub async fn monthly_summary(&self) -> Result<Vec<MonthlyTotal>, AppError> {
        Ok(self.repo.monthly_totals().await?)
    }

    /// Totals per category, largest first.
    pub async fn category_summary(&self) -> Result<Vec<CategoryTotal>, AppError> {
        Ok(self.repo.category_totals().await?)
    }
}

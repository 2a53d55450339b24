use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::application::{CategoryTotal, MonthlyTotal};
use crate::domain::{Expense, ExpenseId, NewExpense, DATE_FORMAT};

use super::MIGRATION_001_EXPENSES;

const EXPENSE_COLUMNS: &str = "id, amount, category, note, date";

/// Repository for persisting and querying expenses.
///
/// Every method runs a single statement on a connection borrowed from the
/// pool for the duration of that statement.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Create the expenses table if it is missing. Safe to run on every startup.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_EXPENSES)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize the store (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Append a new expense dated `date` and return its id.
    /// The input is persisted as given; validation is the caller's job.
    pub async fn insert_expense(
        &self,
        expense: &NewExpense,
        date: NaiveDate,
    ) -> Result<ExpenseId> {
        let row = sqlx::query(
            r#"
            INSERT INTO expenses (amount, category, note, date)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(expense.amount)
        .bind(&expense.category)
        .bind(&expense.note)
        .bind(date.format(DATE_FORMAT).to_string())
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert expense")?;

        Ok(row.get("id"))
    }

    /// Get an expense by id.
    pub async fn get_expense(&self, id: ExpenseId) -> Result<Option<Expense>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM expenses WHERE id = ?",
            EXPENSE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch expense")?;

        match row {
            Some(row) => Ok(Some(Self::row_to_expense(&row)?)),
            None => Ok(None),
        }
    }

    /// List all expenses, newest date first. Same-day entries are ordered
    /// by id, newest first.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM expenses ORDER BY date DESC, id DESC",
            EXPENSE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .context("Failed to list expenses")?;

        rows.iter().map(Self::row_to_expense).collect()
    }

    /// Delete an expense by id. Returns whether a row was removed; a missing
    /// id is not an error.
    pub async fn delete_expense(&self, id: ExpenseId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete expense")?;
        Ok(result.rows_affected() > 0)
    }

    /// Sum amounts per `YYYY-MM` month, latest month first.
    pub async fn monthly_totals(&self) -> Result<Vec<MonthlyTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT SUBSTR(date, 1, 7) AS month, TOTAL(amount) AS total
            FROM expenses
            GROUP BY month
            ORDER BY month DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to compute monthly totals")?;

        rows.iter()
            .map(|row| -> Result<MonthlyTotal> {
                Ok(MonthlyTotal {
                    month: row
                        .try_get::<Option<String>, _>("month")?
                        .unwrap_or_default(),
                    total: row.try_get("total")?,
                })
            })
            .collect()
    }

    /// Sum amounts per category (exact, case-sensitive match), largest total
    /// first. Equal totals are ordered by category name.
    pub async fn category_totals(&self) -> Result<Vec<CategoryTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT category, TOTAL(amount) AS total
            FROM expenses
            GROUP BY category
            ORDER BY total DESC, category ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to compute category totals")?;

        rows.iter()
            .map(|row| -> Result<CategoryTotal> {
                Ok(CategoryTotal {
                    category: row
                        .try_get::<Option<String>, _>("category")?
                        .unwrap_or_default(),
                    total: row.try_get("total")?,
                })
            })
            .collect()
    }

    // Columns are nullable in databases created by older front ends. A row
    // without a readable date is still returned so it can be listed and deleted.
    fn row_to_expense(row: &sqlx::sqlite::SqliteRow) -> Result<Expense> {
        let id: ExpenseId = row.try_get("id")?;
        let date_str: Option<String> = row.try_get("date")?;
        let date = match date_str.as_deref() {
            None => None,
            Some(s) => match NaiveDate::parse_from_str(s, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(e) => {
                    tracing::warn!(id, date = s, "unreadable expense date: {}", e);
                    None
                }
            },
        };

        Ok(Expense {
            id,
            amount: row.try_get::<Option<f64>, _>("amount")?.unwrap_or_default(),
            category: row.try_get::<Option<String>, _>("category")?.unwrap_or_default(),
            note: row.try_get::<Option<String>, _>("note")?.unwrap_or_default(),
            date,
        })
    }
}

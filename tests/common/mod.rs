// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use outlay::application::ExpenseService;
use outlay::domain::{ManualClock, NewExpense};
use std::sync::Arc;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database and a clock
/// pinned to 2024-01-01
pub async fn test_service() -> Result<(ExpenseService, Arc<ManualClock>, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let clock = Arc::new(ManualClock::new(parse_date("2024-01-01")));
    let service = ExpenseService::init(db_path.to_str().unwrap())
        .await?
        .with_clock(clock.clone());
    Ok((service, clock, temp_dir))
}

/// Helper to parse a YYYY-MM-DD string
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Record an expense as if it had been entered on `date`
pub async fn add_on(
    service: &ExpenseService,
    clock: &ManualClock,
    date: &str,
    amount: f64,
    category: &str,
) -> Result<i64> {
    clock.set(parse_date(date));
    let expense = service
        .add_expense(NewExpense::new(amount, category))
        .await?;
    Ok(expense.id)
}

/// Insert a row without a date, bypassing the store, the way a hand-edited
/// or older database might contain one
pub async fn insert_undated(temp_dir: &TempDir, amount: f64, category: &str) -> Result<i64> {
    let db_path = temp_dir.path().join("test.db");
    let pool = sqlx::SqlitePool::connect(&format!("sqlite:{}", db_path.to_str().unwrap())).await?;
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO expenses (amount, category, note, date) VALUES (?, ?, '', NULL) RETURNING id",
    )
    .bind(amount)
    .bind(category)
    .fetch_one(&pool)
    .await?;
    pool.close().await;
    Ok(id)
}

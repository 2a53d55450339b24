use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::ExpenseService;
use crate::domain::{format_amount, Expense};

/// Full ledger snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub expenses: Vec<Expense>,
}

/// Exporter for converting ledger data to CSV and JSON
pub struct Exporter<'a> {
    service: &'a ExpenseService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a ExpenseService) -> Self {
        Self { service }
    }

    /// Export expenses to CSV format, in listing order
    pub async fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let expenses = self.service.list_expenses().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "amount", "category", "note"])?;

        for expense in &expenses {
            csv_writer.write_record([
                expense.id.to_string(),
                expense.date_str(),
                format_amount(expense.amount),
                expense.category.clone(),
                expense.note.clone(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(expenses.len())
    }

    /// Export monthly totals to CSV format
    pub async fn export_monthly_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let totals = self.service.monthly_summary().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["month", "total"])?;
        for row in &totals {
            csv_writer.write_record([row.month.clone(), format_amount(row.total)])?;
        }

        csv_writer.flush()?;
        Ok(totals.len())
    }

    /// Export category totals to CSV format
    pub async fn export_categories_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let totals = self.service.category_summary().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["category", "total"])?;
        for row in &totals {
            csv_writer.write_record([row.category.clone(), format_amount(row.total)])?;
        }

        csv_writer.flush()?;
        Ok(totals.len())
    }

    /// Export every expense as a JSON snapshot
    pub async fn export_expenses_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let expenses = self.service.list_expenses().await?;

        let snapshot = LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            expenses,
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }
}

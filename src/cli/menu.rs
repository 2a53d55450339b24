use anyhow::Result;
use std::io::{BufRead, Write};

use crate::application::{AppError, CategoryTotal, ExpenseService, MonthlyTotal};
use crate::domain::{format_amount, parse_amount, Expense, ExpenseId, NewExpense};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    MonthlySummary,
    CategorySummary,
    Delete,
    Exit,
}

impl MenuChoice {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::MonthlySummary),
            "4" => Some(MenuChoice::CategorySummary),
            "5" => Some(MenuChoice::Delete),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

const MENU: &str = "\
=== Expense Tracker ===
1) Add Expense
2) Show Expenses
3) Monthly Summary
4) Category Summary
5) Delete Expense
6) Exit";

/// Run the interactive expense menu until the user exits or input ends.
///
/// Invalid input is reported and the menu is shown again. Storage failures
/// end the loop with an error.
pub async fn run_menu<R: BufRead, W: Write>(
    service: &ExpenseService,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        writeln!(output, "\n{}", MENU)?;
        let Some(line) = prompt(input, output, "Select option: ")? else {
            writeln!(output, "\nGoodbye!")?;
            return Ok(());
        };

        match MenuChoice::from_str(&line) {
            Some(MenuChoice::Add) => add_expense(service, input, output).await?,
            Some(MenuChoice::List) => {
                let expenses = service.list_expenses().await?;
                write_expenses(output, &expenses)?;
            }
            Some(MenuChoice::MonthlySummary) => {
                let totals = service.monthly_summary().await?;
                write_monthly_summary(output, &totals)?;
            }
            Some(MenuChoice::CategorySummary) => {
                let totals = service.category_summary().await?;
                write_category_summary(output, &totals)?;
            }
            Some(MenuChoice::Delete) => delete_expense(service, input, output).await?,
            Some(MenuChoice::Exit) => {
                writeln!(output, "Goodbye!")?;
                return Ok(());
            }
            None => writeln!(output, "Unknown option '{}'. Choose 1-6.", line.trim())?,
        }
    }
}

async fn add_expense<R: BufRead, W: Write>(
    service: &ExpenseService,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let Some(amount) = prompt(input, output, "Amount: ")? else {
        return Ok(());
    };
    let amount = match parse_amount(&amount) {
        Ok(amount) => amount,
        Err(e) => {
            writeln!(output, "Invalid amount: {}", e)?;
            return Ok(());
        }
    };
    let category =
        prompt(input, output, "Category (Food, Transport, etc): ")?.unwrap_or_default();
    let note = prompt(input, output, "Note: ")?.unwrap_or_default();

    let expense = NewExpense::new(amount, category).with_note(note);
    match service.add_expense(expense).await {
        Ok(expense) => writeln!(output, "Expense saved! (#{})", expense.id)?,
        Err(AppError::StorageUnavailable(e)) => return Err(e),
        Err(e) => writeln!(output, "{}", e)?,
    }
    Ok(())
}

async fn delete_expense<R: BufRead, W: Write>(
    service: &ExpenseService,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    let expenses = service.list_expenses().await?;
    write_expenses(output, &expenses)?;
    if expenses.is_empty() {
        return Ok(());
    }

    let Some(id) = prompt(input, output, "Enter ID to delete: ")? else {
        return Ok(());
    };
    let id: ExpenseId = match id.trim().parse() {
        Ok(id) => id,
        Err(_) => {
            writeln!(output, "Invalid ID '{}'", id.trim())?;
            return Ok(());
        }
    };

    service.delete_expense(id).await?;
    writeln!(output, "Deleted!")?;
    Ok(())
}

/// Print `label` and read one line. Returns `None` at end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

pub fn write_expenses<W: Write>(output: &mut W, expenses: &[Expense]) -> Result<()> {
    writeln!(output, "\n=== Expense List ===")?;
    if expenses.is_empty() {
        writeln!(output, "No expenses recorded.")?;
        return Ok(());
    }

    for e in expenses {
        writeln!(
            output,
            "{}. {} | {} | {} | {}",
            e.id,
            e.date_str(),
            format_amount(e.amount),
            e.category,
            e.note
        )?;
    }
    Ok(())
}

pub fn write_monthly_summary<W: Write>(output: &mut W, totals: &[MonthlyTotal]) -> Result<()> {
    writeln!(output, "\n=== Monthly Summary ===")?;
    if totals.is_empty() {
        writeln!(output, "No data.")?;
        return Ok(());
    }

    for row in totals {
        writeln!(output, "{} : {}", row.month, format_amount(row.total))?;
    }
    Ok(())
}

pub fn write_category_summary<W: Write>(output: &mut W, totals: &[CategoryTotal]) -> Result<()> {
    writeln!(output, "\n=== Category Summary ===")?;
    if totals.is_empty() {
        writeln!(output, "No data.")?;
        return Ok(());
    }

    for row in totals {
        writeln!(output, "{} : {}", row.category, format_amount(row.total))?;
    }
    Ok(())
}

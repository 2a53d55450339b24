pub mod menu;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{AppError, ExpenseService};
use crate::domain::{format_amount, parse_amount, ExpenseId, NewExpense};
use crate::io::Exporter;

/// Outlay - Personal Expense Ledger
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "A local-first personal expense ledger")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(
        short,
        long,
        env = "OUTLAY_DB",
        default_value = "expenses.db",
        global = true
    )]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run (the interactive menu if omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the database and expenses table if missing
    Init,

    /// Record a new expense dated today
    Add {
        /// Amount spent (e.g., "12.50" or "12")
        amount: String,

        /// Category (e.g., "Food", "Transport")
        #[arg(short, long)]
        category: String,

        /// Free-text note
        #[arg(short, long, default_value = "")]
        note: String,
    },

    /// List all expenses, newest first
    List {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Totals per month
    Monthly {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Totals per category
    Categories {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show a single expense
    Show {
        /// Expense ID
        id: ExpenseId,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: ExpenseId,
    },

    /// Export data to CSV or JSON
    Export {
        /// What to export: expenses, monthly, categories, full
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Interactive menu
    Menu,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let service = ExpenseService::init(&self.database).await?;

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Init => {
                println!("Database initialized: {}", self.database);
            }

            Commands::Add {
                amount,
                category,
                note,
            } => {
                let amount = parse_amount(&amount)
                    .with_context(|| format!("Invalid amount '{}'. Use '12.50' or '12'", amount))?;
                let expense = service
                    .add_expense(NewExpense::new(amount, category).with_note(note))
                    .await?;
                println!(
                    "Expense saved: {} {} on {} (#{})",
                    format_amount(expense.amount),
                    expense.category,
                    expense.date_str(),
                    expense.id
                );
            }

            Commands::List { format } => run_list_command(&service, &format).await?,

            Commands::Monthly { format } => run_monthly_command(&service, &format).await?,

            Commands::Categories { format } => run_categories_command(&service, &format).await?,

            Commands::Show { id } => {
                let expense = service.get_expense(id).await?;
                println!("Expense #{}", expense.id);
                println!("  Date:     {}", expense.date_str());
                println!("  Amount:   {}", format_amount(expense.amount));
                println!("  Category: {}", expense.category);
                println!("  Note:     {}", expense.note);
            }

            Commands::Delete { id } => run_delete_command(&service, id).await?,

            Commands::Export {
                export_type,
                output,
            } => run_export_command(&service, &export_type, output.as_deref()).await?,

            Commands::Menu => {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                menu::run_menu(&service, &mut stdin.lock(), &mut stdout.lock()).await?;
            }
        }

        Ok(())
    }
}

async fn run_delete_command(service: &ExpenseService, id: ExpenseId) -> Result<()> {
    match service.get_expense(id).await {
        Ok(expense) => println!(
            "{} | {} | {} | {}",
            expense.date_str(),
            format_amount(expense.amount),
            expense.category,
            expense.note
        ),
        // Deleting an unknown id is still a success
        Err(AppError::ExpenseNotFound(_)) => {}
        Err(e) => return Err(e.into()),
    }
    service.delete_expense(id).await?;
    println!("Deleted!");
    Ok(())
}

async fn run_list_command(service: &ExpenseService, format: &str) -> Result<()> {
    match format {
        "json" => {
            let expenses = service.list_expenses().await?;
            println!("{}", serde_json::to_string_pretty(&expenses)?);
        }
        "csv" => {
            Exporter::new(service)
                .export_expenses_csv(std::io::stdout())
                .await?;
        }
        _ => {
            let expenses = service.list_expenses().await?;
            if expenses.is_empty() {
                println!("No expenses recorded.");
                return Ok(());
            }

            println!(
                "{:<6} {:<10} {:>12} {:<16} {}",
                "ID", "DATE", "AMOUNT", "CATEGORY", "NOTE"
            );
            println!("{}", "-".repeat(70));
            for expense in &expenses {
                println!(
                    "{:<6} {:<10} {:>12} {:<16} {}",
                    expense.id,
                    expense.date_str(),
                    format_amount(expense.amount),
                    truncate(&expense.category, 16),
                    expense.note
                );
            }
        }
    }
    Ok(())
}

async fn run_monthly_command(service: &ExpenseService, format: &str) -> Result<()> {
    match format {
        "json" => {
            let totals = service.monthly_summary().await?;
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
        "csv" => {
            Exporter::new(service)
                .export_monthly_csv(std::io::stdout())
                .await?;
        }
        _ => {
            let totals = service.monthly_summary().await?;
            if totals.is_empty() {
                println!("No data.");
                return Ok(());
            }

            println!("{:<10} {:>12}", "MONTH", "TOTAL");
            println!("{}", "-".repeat(23));
            for row in &totals {
                println!("{:<10} {:>12}", row.month, format_amount(row.total));
            }
        }
    }
    Ok(())
}

async fn run_categories_command(service: &ExpenseService, format: &str) -> Result<()> {
    match format {
        "json" => {
            let totals = service.category_summary().await?;
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
        "csv" => {
            Exporter::new(service)
                .export_categories_csv(std::io::stdout())
                .await?;
        }
        _ => {
            let totals = service.category_summary().await?;
            if totals.is_empty() {
                println!("No data.");
                return Ok(());
            }

            println!("{:<20} {:>12}", "CATEGORY", "TOTAL");
            println!("{}", "-".repeat(33));
            for row in &totals {
                println!(
                    "{:<20} {:>12}",
                    truncate(&row.category, 20),
                    format_amount(row.total)
                );
            }
        }
    }
    Ok(())
}

async fn run_export_command(
    service: &ExpenseService,
    export_type: &str,
    output: Option<&str>,
) -> Result<()> {
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = match export_type {
        "expenses" => exporter.export_expenses_csv(writer).await?,
        "monthly" => exporter.export_monthly_csv(writer).await?,
        "categories" => exporter.export_categories_csv(writer).await?,
        "full" => exporter.export_expenses_json(writer).await?.expenses.len(),
        _ => {
            anyhow::bail!(
                "Invalid export type '{}'. Valid types: expenses, monthly, categories, full",
                export_type
            );
        }
    };

    if output.is_some() {
        eprintln!("Exported {} rows", count);
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

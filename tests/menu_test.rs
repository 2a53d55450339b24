mod common;

use anyhow::Result;
use common::{add_on, insert_undated, parse_date, test_service};
use outlay::domain::NewExpense;
use outlay::cli::menu::run_menu;
use std::io::Cursor;

async fn run_script(service: &outlay::application::ExpenseService, script: &str) -> Result<String> {
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut output = Vec::new();
    run_menu(service, &mut input, &mut output).await?;
    Ok(String::from_utf8(output)?)
}

#[tokio::test]
async fn test_menu_add_then_list() -> Result<()> {
    let (service, clock, _temp) = test_service().await?;
    clock.set(parse_date("2024-04-02"));

    let out = run_script(&service, "1\n12.50\nFood\nlunch\n2\n6\n").await?;

    assert!(out.contains("Expense saved!"));
    assert!(out.contains("2024-04-02 | 12.50 | Food | lunch"));
    assert!(out.trim_end().ends_with("Goodbye!"));

    let expenses = service.list_expenses().await?;
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].note, "lunch");

    Ok(())
}

#[tokio::test]
async fn test_menu_rejects_invalid_input() -> Result<()> {
    let (service, _clock, _temp) = test_service().await?;

    // Non-numeric amount, then a blank category
    let out = run_script(&service, "1\nabc\n1\n5\n \nnote\n6\n").await?;

    assert!(out.contains("Invalid amount"));
    assert!(out.contains("Category is required"));
    assert!(service.list_expenses().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_menu_summaries() -> Result<()> {
    let (service, clock, _temp) = test_service().await?;
    add_on(&service, &clock, "2024-01-05", 10.0, "Food").await?;
    add_on(&service, &clock, "2024-01-20", 5.0, "Transport").await?;

    let out = run_script(&service, "3\n4\n6\n").await?;

    assert!(out.contains("=== Monthly Summary ==="));
    assert!(out.contains("2024-01 : 15.00"));
    assert!(out.contains("=== Category Summary ==="));
    assert!(out.contains("Food : 10.00"));
    assert!(out.contains("Transport : 5.00"));

    Ok(())
}

#[tokio::test]
async fn test_menu_summaries_on_empty_store() -> Result<()> {
    let (service, _clock, _temp) = test_service().await?;

    let out = run_script(&service, "2\n3\n4\n6\n").await?;

    assert!(out.contains("No expenses recorded."));
    assert_eq!(out.matches("No data.").count(), 2);

    Ok(())
}

#[tokio::test]
async fn test_menu_delete() -> Result<()> {
    let (service, clock, _temp) = test_service().await?;
    let id = add_on(&service, &clock, "2024-01-05", 10.0, "Food").await?;

    let out = run_script(&service, &format!("5\n{}\n6\n", id)).await?;

    assert!(out.contains("Deleted!"));
    assert!(service.list_expenses().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_menu_delete_unknown_id_still_succeeds() -> Result<()> {
    let (service, clock, _temp) = test_service().await?;
    add_on(&service, &clock, "2024-01-05", 10.0, "Food").await?;

    let out = run_script(&service, "5\n424242\n5\nxyz\n6\n").await?;

    assert!(out.contains("Deleted!"));
    assert!(out.contains("Invalid ID 'xyz'"));
    assert_eq!(service.list_expenses().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_menu_exit_on_end_of_input() -> Result<()> {
    let (service, _clock, _temp) = test_service().await?;

    let out = run_script(&service, "9\n").await?;

    assert!(out.contains("Unknown option '9'"));
    assert!(out.trim_end().ends_with("Goodbye!"));

    Ok(())
}

#[tokio::test]
async fn test_menu_and_service_store_the_same_input() -> Result<()> {
    let (service, _clock, _temp) = test_service().await?;

    service
        .add_expense(NewExpense::new(1.0, " Food ").with_note("  x "))
        .await?;
    run_script(&service, "1\n2\n Food \n  x \n6\n").await?;

    let expenses = service.list_expenses().await?;
    assert_eq!(expenses.len(), 2);
    assert_eq!(expenses[0].category, expenses[1].category);
    assert_eq!(expenses[0].note, expenses[1].note);
    assert_eq!(expenses[0].note, "  x ");

    let categories = service.category_summary().await?;
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].category, " Food ");
    assert_eq!(categories[0].total, 3.0);

    Ok(())
}

#[tokio::test]
async fn test_menu_lists_and_deletes_undated_row() -> Result<()> {
    let (service, clock, temp) = test_service().await?;
    add_on(&service, &clock, "2024-01-05", 10.0, "Food").await?;
    let undated = insert_undated(&temp, 1.0, "Misc").await?;

    let out = run_script(&service, &format!("2\n5\n{}\n6\n", undated)).await?;

    assert!(out.contains(&format!("{}.  | 1.00 | Misc |", undated)));
    assert!(out.contains("Deleted!"));

    let expenses = service.list_expenses().await?;
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].category, "Food");

    Ok(())
}

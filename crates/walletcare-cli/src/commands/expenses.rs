//! Expense command implementations (add, list, reset)

use std::io::{self, Write};

use anyhow::{Context, Result};
use walletcare_core::insights::parse_timestamp;
use walletcare_core::{format_brl, Category, DeviceStore, NewExpense};

use super::truncate;

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    store: &DeviceStore,
    device: &str,
    amount: f64,
    category: &str,
    description: &str,
    impulsive: bool,
    date: Option<&str>,
) -> Result<()> {
    let category: Category = category.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let timestamp = date
        .map(|d| {
            parse_timestamp(d)
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
                .with_context(|| format!("Invalid --date '{}' (use YYYY-MM-DD)", d))
        })
        .transpose()?;

    let expense = store.add_expense(
        device,
        NewExpense {
            amount,
            category,
            description: description.to_string(),
            is_impulsive: impulsive,
            timestamp,
        },
    )?;

    println!(
        "✅ Expense #{} recorded: {} in {}",
        expense.id,
        format_brl(expense.amount),
        expense.category.label()
    );

    Ok(())
}

pub fn cmd_list(store: &DeviceStore, device: &str, limit: usize) -> Result<()> {
    let expenses = store.list_expenses(device)?;

    if expenses.is_empty() {
        println!("No expenses recorded. Add one with:");
        println!("  walletcare chat \"gastei 25 reais no lanche\"");
        return Ok(());
    }

    println!();
    println!("📝 Recent Expenses ({} total)", expenses.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in expenses.iter().rev().take(limit) {
        let date = parse_timestamp(&expense.timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "----------".to_string());
        let flag = if expense.is_impulsive { "⚡" } else { " " };

        println!(
            "   {} │ {:>12} │ {:<14} │ {}{}",
            date,
            format_brl(expense.amount),
            expense.category.label(),
            flag,
            truncate(&expense.description, 40)
        );
    }

    Ok(())
}

pub fn cmd_reset(store: &DeviceStore, device: &str, yes: bool) -> Result<()> {
    if !yes {
        print!(
            "⚠️  This will delete all expenses of device '{}'.\n",
            device
        );
        print!("   Settings will be preserved.\n\n");
        print!("Are you sure? [y/N] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.reset_expenses(device)?;
    println!("✅ Expenses reset for device '{}'.", device);

    Ok(())
}

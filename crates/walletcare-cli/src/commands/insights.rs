//! Insight command implementations (insights, dashboard, invest)

use anyhow::Result;
use walletcare_core::{
    analyze_patterns, format_brl, DashboardSummary, DeviceStore, InvestmentSuggestion,
};

pub fn cmd_insights(store: &DeviceStore, device: &str) -> Result<()> {
    let expenses = store.list_expenses(device)?;
    let report = analyze_patterns(&expenses);

    println!();
    println!("💡 Insights");
    println!("   ─────────────────────────────────────────────────────────────");
    for insight in &report.insights {
        println!("   {}", insight);
    }

    Ok(())
}

pub fn cmd_dashboard(store: &DeviceStore, device: &str) -> Result<()> {
    let expenses = store.list_expenses(device)?;
    let config = store.load_config(device)?;
    let summary = DashboardSummary::current_month(&expenses, &config);

    println!();
    println!("📊 Dashboard (this month)");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:            {:>14}", format_brl(summary.monthly_income));
    println!("   Spent:             {:>14}", format_brl(summary.total_spent));
    println!(
        "   Potential savings: {:>14}",
        format_brl(summary.potential_savings)
    );
    println!("   Expenses:          {:>14}", summary.month_expenses.len());

    if !summary.category_totals.is_empty() {
        println!();
        println!("   By category:");
        for entry in &summary.category_totals {
            println!(
                "     {:<16} {:>14}",
                entry.category.label(),
                format_brl(entry.total)
            );
        }
    }

    if config.monthly_goal > 0.0 && summary.total_spent > config.monthly_goal {
        println!();
        println!(
            "⚠️  Monthly goal of {} exceeded by {}",
            format_brl(config.monthly_goal),
            format_brl(summary.total_spent - config.monthly_goal)
        );
    }

    Ok(())
}

pub fn cmd_invest(store: &DeviceStore, device: &str) -> Result<()> {
    let expenses = store.list_expenses(device)?;
    let config = store.load_config(device)?;
    let suggestion = InvestmentSuggestion::current_month(&expenses, &config);

    println!();
    println!("📈 Investment Suggestion (this month)");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Income:    {:>14}", format_brl(suggestion.monthly_income));
    println!("   Spent:     {:>14}", format_brl(suggestion.total_spent));
    println!("   Surplus:   {:>14}", format_brl(suggestion.monthly_surplus));
    println!(
        "   Suggested: {:>14}",
        format_brl(suggestion.suggested_investment)
    );

    if suggestion.monthly_income <= 0.0 {
        println!();
        println!("💡 Tip: Set your income with 'walletcare config --income 3000'");
    }

    println!();
    for tip in &suggestion.tips {
        println!("   • {}", tip);
    }

    Ok(())
}

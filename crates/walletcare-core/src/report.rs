//! Plain-text financial report
//!
//! Sections:
//! - Financial summary (income, spending, impulsive spending, surplus)
//! - Totals per category
//! - Expense detail table, newest first
//! - Insights and recommendations

use chrono::NaiveDateTime;

use crate::insights::{parse_timestamp, recommendations, ReportStats};
use crate::models::{format_brl, DeviceConfig, Expense};

/// Maximum description length in the detail table
const DESCRIPTION_WIDTH: usize = 50;

const TITLE: &str = "WalletCare - Relatório Financeiro";
const FOOTER: &str = "Relatório gerado pelo WalletCare - Seu assistente financeiro pessoal";

fn heading(lines: &mut Vec<String>, title: &str) {
    lines.push(title.to_string());
    lines.push("─".repeat(title.chars().count()));
}

/// Truncate to the table width, marking the cut with "..."
fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_WIDTH {
        let head: String = description.chars().take(DESCRIPTION_WIDTH).collect();
        format!("{}...", head)
    } else {
        description.to_string()
    }
}

fn display_date(timestamp: &str) -> String {
    parse_timestamp(timestamp)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Render the full report for one device
pub fn render_report(
    expenses: &[Expense],
    config: &DeviceConfig,
    generated_at: NaiveDateTime,
) -> String {
    let mut lines = Vec::new();

    lines.push(TITLE.to_string());
    lines.push("═".repeat(TITLE.chars().count()));
    lines.push(String::new());
    lines.push(format!(
        "Data do Relatório: {}",
        generated_at.format("%d/%m/%Y às %H:%M")
    ));
    lines.push(String::new());

    let stats = ReportStats::from_expenses(expenses, config);

    if let Some(stats) = &stats {
        heading(&mut lines, "Resumo Financeiro");
        let rows = [
            ("Renda Mensal:", format_brl(stats.monthly_income)),
            ("Total de Gastos:", format_brl(stats.total_spent)),
            ("Gastos Impulsivos:", format_brl(stats.impulsive_total)),
            ("Economia Potencial:", format_brl(stats.potential_savings)),
            ("Sobra do Mês:", format_brl(stats.monthly_surplus)),
            ("Número de Gastos:", stats.expense_count.to_string()),
        ];
        for (label, value) in rows {
            lines.push(format!("{:<22}{:>14}", label, value));
        }
        lines.push(String::new());

        if !stats.category_totals.is_empty() {
            heading(&mut lines, "Gastos por Categoria");
            for entry in &stats.category_totals {
                lines.push(format!(
                    "{:<22}{:>14}",
                    entry.category.title(),
                    format_brl(entry.total)
                ));
            }
            lines.push(String::new());
        }
    }

    heading(&mut lines, "Detalhamento de Gastos");
    if expenses.is_empty() {
        lines.push("Nenhum gasto registrado".to_string());
    } else {
        lines.push(format!(
            "{:<12}{:<55}{:<16}{:>12}",
            "Data", "Descrição", "Categoria", "Valor"
        ));

        let mut sorted: Vec<&Expense> = expenses.iter().collect();
        sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        for expense in sorted {
            lines.push(format!(
                "{:<12}{:<55}{:<16}{:>12}",
                display_date(&expense.timestamp),
                truncate_description(&expense.description),
                expense.category.title(),
                format_brl(expense.amount)
            ));
        }
    }
    lines.push(String::new());

    heading(&mut lines, "Insights e Recomendações");
    for line in recommendations(stats.as_ref()) {
        lines.push(format!("• {}", line));
    }
    lines.push(String::new());
    lines.push(FOOTER.to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

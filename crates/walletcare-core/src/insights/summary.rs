//! Dashboard, investment and report summaries over a device's expenses

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{format_brl, Category, DeviceConfig, Expense};

use super::engine::category_totals;

/// Share of the monthly surplus suggested for investing
pub const INVESTMENT_RATIO: f64 = 0.7;

/// Fixed advice shown with every investment suggestion
pub const INVESTMENT_TIPS: [&str; 4] = [
    "Revise gastos não essenciais para aumentar sua capacidade de investimento",
    "Considere investimentos de baixo risco como Tesouro Direto",
    "Mantenha uma reserva de emergência antes de investir",
    "Diversifique seus investimentos para reduzir riscos",
];

/// Parse a stored timestamp (RFC 3339, naive ISO-8601 or a bare date)
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Expenses whose timestamp falls in the given calendar month
///
/// Records with unreadable timestamps are skipped.
pub fn expenses_in_month(expenses: &[Expense], year: i32, month: u32) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| match parse_timestamp(&e.timestamp) {
            Some(dt) => dt.year() == year && dt.month() == month,
            None => {
                warn!(
                    id = e.id,
                    timestamp = e.timestamp.as_str(),
                    "Skipping expense with unreadable timestamp"
                );
                false
            }
        })
        .cloned()
        .collect()
}

/// Month-to-date totals for the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_spent: f64,
    pub category_totals: Vec<CategoryTotal>,
    /// What could have been saved: everything filed as non-essential
    pub potential_savings: f64,
    pub month_expenses: Vec<Expense>,
    pub monthly_income: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

fn to_category_totals(expenses: &[Expense]) -> Vec<CategoryTotal> {
    category_totals(expenses)
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect()
}

impl DashboardSummary {
    pub fn for_month(expenses: &[Expense], config: &DeviceConfig, year: i32, month: u32) -> Self {
        let month_expenses = expenses_in_month(expenses, year, month);

        let total_spent = month_expenses.iter().map(|e| e.amount).sum();
        let potential_savings = month_expenses
            .iter()
            .filter(|e| e.category == Category::NonEssential)
            .map(|e| e.amount)
            .sum();

        Self {
            total_spent,
            category_totals: to_category_totals(&month_expenses),
            potential_savings,
            month_expenses,
            monthly_income: config.monthly_income,
        }
    }

    pub fn current_month(expenses: &[Expense], config: &DeviceConfig) -> Self {
        let today = Local::now().date_naive();
        Self::for_month(expenses, config, today.year(), today.month())
    }
}

/// Conservative investment suggestion for the month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentSuggestion {
    pub monthly_income: f64,
    pub total_spent: f64,
    /// Income minus spending; negative when overspent
    pub monthly_surplus: f64,
    pub suggested_investment: f64,
    pub tips: Vec<String>,
}

impl InvestmentSuggestion {
    pub fn for_month(expenses: &[Expense], config: &DeviceConfig, year: i32, month: u32) -> Self {
        let total_spent: f64 = expenses_in_month(expenses, year, month)
            .iter()
            .map(|e| e.amount)
            .sum();
        let monthly_surplus = config.monthly_income - total_spent;

        Self {
            monthly_income: config.monthly_income,
            total_spent,
            monthly_surplus,
            suggested_investment: (monthly_surplus * INVESTMENT_RATIO).max(0.0),
            tips: INVESTMENT_TIPS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn current_month(expenses: &[Expense], config: &DeviceConfig) -> Self {
        let today = Local::now().date_naive();
        Self::for_month(expenses, config, today.year(), today.month())
    }
}

/// Whole-history statistics used by the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStats {
    pub total_spent: f64,
    pub category_totals: Vec<CategoryTotal>,
    /// Impulsive or non-essential spending
    pub impulsive_total: f64,
    pub potential_savings: f64,
    pub monthly_income: f64,
    /// Income minus spending, or 0 when no income is configured
    pub monthly_surplus: f64,
    pub expense_count: usize,
}

impl ReportStats {
    /// `None` when there is nothing to summarize
    pub fn from_expenses(expenses: &[Expense], config: &DeviceConfig) -> Option<Self> {
        if expenses.is_empty() {
            return None;
        }

        let total_spent: f64 = expenses.iter().map(|e| e.amount).sum();
        let impulsive_total = expenses
            .iter()
            .filter(|e| e.is_impulsive || e.category == Category::NonEssential)
            .map(|e| e.amount)
            .sum();
        let income = config.monthly_income;
        let monthly_surplus = if income > 0.0 {
            income - total_spent
        } else {
            0.0
        };

        Some(Self {
            total_spent,
            category_totals: to_category_totals(expenses),
            impulsive_total,
            potential_savings: impulsive_total,
            monthly_income: income,
            monthly_surplus,
            expense_count: expenses.len(),
        })
    }
}

/// Recommendation lines for the report; the two closing tips are always present
pub fn recommendations(stats: Option<&ReportStats>) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(stats) = stats {
        if stats.impulsive_total > 0.0 && stats.total_spent > 0.0 {
            let percentage = stats.impulsive_total / stats.total_spent * 100.0;
            lines.push(format!(
                "{:.1}% dos seus gastos foram impulsivos ou desnecessários.",
                percentage
            ));
        }

        if stats.monthly_surplus > 0.0 {
            lines.push(format!(
                "Você tem uma sobra mensal de {}. Considere investir 70% deste valor.",
                format_brl(stats.monthly_surplus)
            ));
        } else if stats.monthly_surplus < 0.0 {
            lines.push(format!(
                "Atenção! Seus gastos excederam a renda em {}.",
                format_brl(stats.monthly_surplus.abs())
            ));
        }
    }

    lines.push("Revise regularmente seus gastos para identificar oportunidades de economia.".into());
    lines.push("Mantenha o controle diário dos gastos para melhores resultados financeiros.".into());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(amount: f64, category: Category, is_impulsive: bool, timestamp: &str) -> Expense {
        Expense {
            id: 0,
            amount,
            category,
            description: String::new(),
            is_impulsive,
            timestamp: timestamp.to_string(),
        }
    }

    fn config(income: f64) -> DeviceConfig {
        DeviceConfig {
            monthly_income: income,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-03-10T12:30:00").is_some());
        assert!(parse_timestamp("2024-03-10T12:30:00.123456").is_some());
        assert!(parse_timestamp("2024-03-10T12:30:00-03:00").is_some());
        assert!(parse_timestamp("2024-03-10").is_some());
        assert!(parse_timestamp("ontem").is_none());
    }

    #[test]
    fn test_expenses_in_month_filters_and_skips_bad_dates() {
        let expenses = vec![
            expense(10.0, Category::Food, false, "2024-03-01T08:00:00"),
            expense(20.0, Category::Food, false, "2024-02-29T23:59:59"),
            expense(30.0, Category::Food, false, "not a date"),
            expense(40.0, Category::Food, false, "2023-03-15T10:00:00"),
        ];

        let march = expenses_in_month(&expenses, 2024, 3);
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].amount, 10.0);
    }

    #[test]
    fn test_dashboard_for_month() {
        let expenses = vec![
            expense(25.0, Category::Food, false, "2024-05-02T12:00:00"),
            expense(60.0, Category::NonEssential, true, "2024-05-03T12:00:00"),
            expense(15.0, Category::Food, false, "2024-05-04T12:00:00"),
            expense(999.0, Category::Other, false, "2024-04-30T12:00:00"),
        ];

        let summary = DashboardSummary::for_month(&expenses, &config(2000.0), 2024, 5);
        assert_eq!(summary.total_spent, 100.0);
        assert_eq!(summary.potential_savings, 60.0);
        assert_eq!(summary.month_expenses.len(), 3);
        assert_eq!(summary.monthly_income, 2000.0);
        assert_eq!(
            summary.category_totals,
            vec![
                CategoryTotal {
                    category: Category::Food,
                    total: 40.0
                },
                CategoryTotal {
                    category: Category::NonEssential,
                    total: 60.0
                },
            ]
        );
    }

    #[test]
    fn test_investment_suggestion() {
        let expenses = vec![expense(500.0, Category::Other, false, "2024-05-02T12:00:00")];

        let suggestion = InvestmentSuggestion::for_month(&expenses, &config(1500.0), 2024, 5);
        assert_eq!(suggestion.monthly_surplus, 1000.0);
        assert!((suggestion.suggested_investment - 700.0).abs() < 1e-9);
        assert_eq!(suggestion.tips.len(), 4);
    }

    #[test]
    fn test_investment_suggestion_never_negative() {
        let expenses = vec![expense(500.0, Category::Other, false, "2024-05-02T12:00:00")];

        let suggestion = InvestmentSuggestion::for_month(&expenses, &config(100.0), 2024, 5);
        assert_eq!(suggestion.monthly_surplus, -400.0);
        assert_eq!(suggestion.suggested_investment, 0.0);
    }

    #[test]
    fn test_report_stats() {
        let expenses = vec![
            expense(40.0, Category::NonEssential, false, ""),
            expense(10.0, Category::Games, true, ""),
            expense(50.0, Category::Food, false, ""),
        ];

        let stats = ReportStats::from_expenses(&expenses, &config(0.0)).unwrap();
        assert_eq!(stats.total_spent, 100.0);
        assert_eq!(stats.impulsive_total, 50.0);
        assert_eq!(stats.potential_savings, 50.0);
        assert_eq!(stats.monthly_surplus, 0.0);
        assert_eq!(stats.expense_count, 3);
    }

    #[test]
    fn test_report_stats_empty() {
        assert!(ReportStats::from_expenses(&[], &config(1000.0)).is_none());
    }

    #[test]
    fn test_recommendations() {
        let expenses = vec![
            expense(25.0, Category::NonEssential, true, ""),
            expense(75.0, Category::Food, false, ""),
        ];
        let stats = ReportStats::from_expenses(&expenses, &config(300.0)).unwrap();
        let lines = recommendations(Some(&stats));

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "25.0% dos seus gastos foram impulsivos ou desnecessários.");
        assert_eq!(
            lines[1],
            "Você tem uma sobra mensal de R$ 200.00. Considere investir 70% deste valor."
        );
    }

    #[test]
    fn test_recommendations_overspent() {
        let expenses = vec![expense(150.0, Category::Food, false, "")];
        let stats = ReportStats::from_expenses(&expenses, &config(100.0)).unwrap();
        let lines = recommendations(Some(&stats));

        assert_eq!(lines[0], "Atenção! Seus gastos excederam a renda em R$ 50.00.");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_recommendations_without_stats() {
        assert_eq!(recommendations(None).len(), 2);
    }
}

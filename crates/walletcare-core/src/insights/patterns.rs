//! Built-in spending pattern analyzers
//!
//! - Impulsive share: percentage of spending flagged impulsive
//! - Dominant category: category with the largest total
//! - Budget level: warning above 1000, congratulations below 500

use crate::models::{format_brl, Category};

use super::engine::{Insight, SpendingTotals};

/// Totals above this are flagged as high spending
pub const HIGH_SPENDING_THRESHOLD: f64 = 1000.0;

/// Totals below this are congratulated as controlled
pub const CONTROLLED_SPENDING_THRESHOLD: f64 = 500.0;

pub const HIGH_SPENDING_INSIGHT: &str =
    "⚠️ Gastos altos este mês. Considere revisar seu orçamento!";

pub const CONTROLLED_SPENDING_INSIGHT: &str = "✅ Gastos controlados este mês. Parabéns!";

/// Share of spending flagged impulsive; silent when nothing was impulsive
pub struct ImpulsiveShareInsight;

impl Insight for ImpulsiveShareInsight {
    fn name(&self) -> &'static str {
        "Impulsive Share"
    }

    fn analyze(&self, totals: &SpendingTotals) -> Option<String> {
        if totals.impulsive_total <= 0.0 || totals.total <= 0.0 {
            return None;
        }

        let percentage = totals.impulsive_total / totals.total * 100.0;
        Some(format!(
            "🚨 {:.1}% dos seus gastos foram impulsivos ({})",
            percentage,
            format_brl(totals.impulsive_total)
        ))
    }
}

/// Category with the largest total
///
/// Ties go to the category that appeared first in the history.
pub struct DominantCategoryInsight;

impl Insight for DominantCategoryInsight {
    fn name(&self) -> &'static str {
        "Dominant Category"
    }

    fn analyze(&self, totals: &SpendingTotals) -> Option<String> {
        let mut dominant: Option<&(Category, f64)> = None;
        for entry in &totals.by_category {
            match dominant {
                Some((_, best)) if entry.1 <= *best => {}
                _ => dominant = Some(entry),
            }
        }

        dominant.map(|(category, amount)| {
            format!(
                "📊 Sua maior categoria de gastos é {} ({})",
                category.label(),
                format_brl(*amount)
            )
        })
    }
}

/// Budget-level message; nothing between 500 and 1000 inclusive
pub struct BudgetLevelInsight;

impl Insight for BudgetLevelInsight {
    fn name(&self) -> &'static str {
        "Budget Level"
    }

    fn analyze(&self, totals: &SpendingTotals) -> Option<String> {
        if totals.total > HIGH_SPENDING_THRESHOLD {
            Some(HIGH_SPENDING_INSIGHT.to_string())
        } else if totals.total < CONTROLLED_SPENDING_THRESHOLD {
            Some(CONTROLLED_SPENDING_INSIGHT.to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::analyze_patterns;
    use crate::models::Expense;

    fn expense(amount: f64, category: Category, is_impulsive: bool) -> Expense {
        Expense {
            id: 0,
            amount,
            category,
            description: String::new(),
            is_impulsive,
            timestamp: String::new(),
        }
    }

    #[test]
    fn test_analyze_patterns_empty() {
        let report = analyze_patterns(&[]);
        assert_eq!(report.insights, vec!["Ainda não há gastos para analisar"]);
    }

    #[test]
    fn test_analyze_patterns_full_order() {
        let expenses = vec![
            expense(200.0, Category::NonEssential, true),
            expense(900.0, Category::Food, false),
            expense(100.0, Category::Games, false),
        ];

        let report = analyze_patterns(&expenses);
        assert_eq!(
            report.insights,
            vec![
                "🚨 16.7% dos seus gastos foram impulsivos (R$ 200.00)".to_string(),
                "📊 Sua maior categoria de gastos é alimentacao (R$ 900.00)".to_string(),
                HIGH_SPENDING_INSIGHT.to_string(),
            ]
        );
    }

    #[test]
    fn test_no_impulsive_line_when_zero() {
        let expenses = vec![
            expense(20.0, Category::Food, false),
            expense(15.0, Category::Drinks, false),
        ];

        let report = analyze_patterns(&expenses);
        assert_eq!(report.insights.len(), 2);
        assert!(report.insights.iter().all(|i| !i.contains('%')));
        assert_eq!(report.insights[1], CONTROLLED_SPENDING_INSIGHT);
    }

    #[test]
    fn test_no_budget_line_in_middle_band() {
        for total in [500.0, 750.0, 1000.0] {
            let report = analyze_patterns(&[expense(total, Category::Other, false)]);
            assert_eq!(report.insights.len(), 1, "total {}", total);
            assert!(report.insights[0].starts_with("📊"));
        }
    }

    #[test]
    fn test_budget_line_edges() {
        let report = analyze_patterns(&[expense(499.99, Category::Other, false)]);
        assert_eq!(report.insights.last().unwrap(), CONTROLLED_SPENDING_INSIGHT);

        let report = analyze_patterns(&[expense(1000.01, Category::Other, false)]);
        assert_eq!(report.insights.last().unwrap(), HIGH_SPENDING_INSIGHT);
    }

    #[test]
    fn test_dominant_category_tie_goes_to_first_seen() {
        let expenses = vec![
            expense(50.0, Category::Drinks, false),
            expense(50.0, Category::Food, false),
        ];
        let report = analyze_patterns(&expenses);
        assert_eq!(
            report.insights[0],
            "📊 Sua maior categoria de gastos é bebidas (R$ 50.00)"
        );

        let reversed: Vec<Expense> = expenses.into_iter().rev().collect();
        let report = analyze_patterns(&reversed);
        assert!(report.insights[0].contains("alimentacao"));
    }

    #[test]
    fn test_impulsive_percentage_all_impulsive() {
        let report = analyze_patterns(&[expense(30.0, Category::NonEssential, true)]);
        assert_eq!(
            report.insights[0],
            "🚨 100.0% dos seus gastos foram impulsivos (R$ 30.00)"
        );
    }
}

//! Insight Engine - runs the registered analyzers over spending totals

use tracing::debug;

use crate::models::{Category, Expense, InsightReport};

use super::{BudgetLevelInsight, DominantCategoryInsight, ImpulsiveShareInsight};

/// Text returned when there is no history to analyze
pub const NO_EXPENSES_INSIGHT: &str = "Ainda não há gastos para analisar";

/// Aggregates shared by all analyzers, computed once per run
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingTotals {
    /// Sum of all amounts
    pub total: f64,
    /// Sum of amounts flagged impulsive
    pub impulsive_total: f64,
    /// Per-category sums in order of first appearance
    pub by_category: Vec<(Category, f64)>,
}

impl SpendingTotals {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        let total = expenses.iter().map(|e| e.amount).sum();
        let impulsive_total = expenses
            .iter()
            .filter(|e| e.is_impulsive)
            .map(|e| e.amount)
            .sum();

        Self {
            total,
            impulsive_total,
            by_category: category_totals(expenses),
        }
    }
}

/// Accumulate per-category totals, keeping categories in first-seen order
pub fn category_totals(expenses: &[Expense]) -> Vec<(Category, f64)> {
    let mut totals: Vec<(Category, f64)> = Vec::new();

    for expense in expenses {
        match totals.iter_mut().find(|(c, _)| *c == expense.category) {
            Some((_, sum)) => *sum += expense.amount,
            None => totals.push((expense.category, expense.amount)),
        }
    }

    totals
}

/// Trait for insight analyzers
pub trait Insight: Send + Sync {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Produce at most one insight line from the totals
    fn analyze(&self, totals: &SpendingTotals) -> Option<String>;
}

/// The main insight engine; analyzers run in registration order
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in analyzers:
    /// impulsive share, dominant category, budget level
    pub fn new() -> Self {
        let mut engine = Self { insights: vec![] };

        engine.register(Box::new(ImpulsiveShareInsight));
        engine.register(Box::new(DominantCategoryInsight));
        engine.register(Box::new(BudgetLevelInsight));

        engine
    }

    /// Register an insight analyzer
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Names of the registered analyzers, in run order
    pub fn insight_names(&self) -> Vec<&'static str> {
        self.insights.iter().map(|i| i.name()).collect()
    }

    /// Analyze a spending history
    ///
    /// An empty history yields the single placeholder insight.
    pub fn analyze(&self, expenses: &[Expense]) -> InsightReport {
        if expenses.is_empty() {
            return InsightReport {
                insights: vec![NO_EXPENSES_INSIGHT.to_string()],
            };
        }

        let totals = SpendingTotals::from_expenses(expenses);
        let mut insights = Vec::new();

        for insight in &self.insights {
            if let Some(line) = insight.analyze(&totals) {
                debug!(insight = insight.name(), "Insight produced");
                insights.push(line);
            }
        }

        InsightReport { insights }
    }
}

//! Insight Engine - spending history analysis
//!
//! Turns a device's expense history into short, human-readable insights and
//! the aggregate views behind the dashboard and the report.
//!
//! ## Core Insight Types
//!
//! - **Impulsive Share** - how much of the spending was impulsive
//! - **Dominant Category** - where most of the money went
//! - **Budget Level** - warning above R$ 1000, congratulations below R$ 500
//!
//! ## Usage
//!
//! ```rust,ignore
//! use walletcare_core::insights::analyze_patterns;
//!
//! let report = analyze_patterns(&expenses);
//! for line in &report.insights {
//!     println!("{}", line);
//! }
//! ```

pub mod engine;
pub mod patterns;
pub mod summary;

pub use engine::{category_totals, Insight, InsightEngine, SpendingTotals, NO_EXPENSES_INSIGHT};
pub use patterns::{BudgetLevelInsight, DominantCategoryInsight, ImpulsiveShareInsight};
pub use summary::{
    expenses_in_month, parse_timestamp, recommendations, CategoryTotal, DashboardSummary,
    InvestmentSuggestion, ReportStats, INVESTMENT_RATIO,
};

use crate::models::{Expense, InsightReport};

/// Analyze a spending history with the built-in analyzers
///
/// Insight order: impulsive percentage (if any), dominant category,
/// budget level (if any). An empty history yields one placeholder insight.
pub fn analyze_patterns(expenses: &[Expense]) -> InsightReport {
    InsightEngine::new().analyze(expenses)
}

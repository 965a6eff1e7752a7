//! WalletCare Core Library
//!
//! Shared functionality for the WalletCare expense assistant:
//! - Free-text expense classification (amount, category, impulsiveness)
//! - Motivational replies for recorded expenses
//! - Spending insights, dashboard and investment summaries
//! - Plain-text financial report
//! - Per-device JSON storage

pub mod classifier;
pub mod error;
pub mod insights;
pub mod models;
pub mod report;
pub mod store;

pub use classifier::{motivational_reply, CategoryRule, MessageClassifier};
pub use error::{Error, Result};
pub use insights::{
    analyze_patterns, DashboardSummary, Insight, InsightEngine, InvestmentSuggestion, ReportStats,
};
pub use models::{
    format_brl, Category, ChatOutcome, ConfigUpdate, DeviceConfig, Expense, ExpenseDraft,
    InsightReport, Ledger, NewExpense,
};
pub use report::render_report;
pub use store::{default_data_dir, now_timestamp, validate_device_id, DeviceStore};

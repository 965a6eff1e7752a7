//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (data dir, open_store) and message classification
//! - `config` - Device settings
//! - `expenses` - Manual entry, listing and reset
//! - `insights` - Insights, dashboard and investment suggestion
//! - `reports` - Text report generation
//! - `serve` - Web server command

pub mod config;
pub mod core;
pub mod expenses;
pub mod insights;
pub mod reports;
pub mod serve;

// Re-export command functions for main.rs
pub use config::*;
pub use core::*;
pub use expenses::*;
pub use insights::*;
pub use reports::*;
pub use serve::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod chat;
pub mod config;
pub mod dashboard;
pub mod expenses;
pub mod insights;
pub mod report;

// Re-export all handlers for use in router
pub use chat::*;
pub use config::*;
pub use dashboard::*;
pub use expenses::*;
pub use insights::*;
pub use report::*;

//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `resolve_data_dir` / `open_store` - Shared utilities to reach device data
//! - `cmd_classify` - Classify a message without saving
//! - `cmd_chat` - Classify a message and save the expense

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walletcare_core::{default_data_dir, DeviceStore, MessageClassifier};

/// Use --data-dir when given, otherwise the environment/platform default
pub fn resolve_data_dir(data_dir: Option<&Path>) -> PathBuf {
    data_dir.map(Path::to_path_buf).unwrap_or_else(default_data_dir)
}

/// Open the device store, creating the data directory on first use
pub fn open_store(data_dir: &Path) -> Result<DeviceStore> {
    DeviceStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))
}

fn classifier() -> Result<MessageClassifier> {
    MessageClassifier::new().context("Failed to build message classifier")
}

pub fn cmd_classify(message: &str, json: bool) -> Result<()> {
    let outcome = classifier()?.process_message(message);

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("💬 {}", outcome.reply);
    if let Some(expense) = &outcome.expense {
        println!();
        println!("   Amount:    {}", walletcare_core::format_brl(expense.amount));
        println!("   Category:  {}", expense.category.label());
        println!(
            "   Impulsive: {}",
            if expense.is_impulsive { "yes" } else { "no" }
        );
    }

    Ok(())
}

pub fn cmd_chat(store: &DeviceStore, device: &str, message: &str) -> Result<()> {
    let outcome = classifier()?.process_message(message);

    println!("💬 {}", outcome.reply);

    if let Some(draft) = outcome.expense {
        let expense = store
            .add_draft(device, draft)
            .context("Failed to save expense")?;
        println!("   Saved as expense #{} ({})", expense.id, device);
    }

    Ok(())
}

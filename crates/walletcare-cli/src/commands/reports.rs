//! Report command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use walletcare_core::{render_report, DeviceStore};

pub fn cmd_report(store: &DeviceStore, device: &str, output: Option<&Path>) -> Result<()> {
    let expenses = store.list_expenses(device)?;
    let config = store.load_config(device)?;

    let report = render_report(&expenses, &config, Local::now().naive_local());

    match output {
        Some(path) => {
            fs::write(path, &report)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("✅ Report written to {}", path.display());
        }
        None => print!("{}", report),
    }

    Ok(())
}

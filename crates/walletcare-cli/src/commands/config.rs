//! Device settings command implementation

use anyhow::Result;
use walletcare_core::{format_brl, ConfigUpdate, DeviceStore};

pub fn cmd_config(
    store: &DeviceStore,
    device: &str,
    income: Option<f64>,
    goal: Option<f64>,
    theme: Option<String>,
) -> Result<()> {
    let changed = income.is_some() || goal.is_some() || theme.is_some();

    let config = if changed {
        let config = store.update_config(
            device,
            ConfigUpdate {
                monthly_income: income,
                first_access: Some(false),
                theme,
                monthly_goal: goal,
            },
        )?;
        println!("✅ Settings updated");
        config
    } else {
        store.load_config(device)?
    };

    println!();
    println!("⚙️  Settings for device '{}'", device);
    println!("   ─────────────────────────────");
    println!("   Monthly income: {}", format_brl(config.monthly_income));
    println!("   Monthly goal:   {}", format_brl(config.monthly_goal));
    println!("   Theme:          {}", config.theme);

    Ok(())
}

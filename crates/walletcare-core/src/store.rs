//! Per-device JSON storage
//!
//! Each device owns a directory under the data root:
//!
//! ```text
//! <root>/<device_id>/expenses.json   { "expenses": [...], "categories": [...] }
//! <root>/<device_id>/config.json     { "monthly_income": 0, ... }
//! ```
//!
//! Files are created with defaults the first time a device is touched and
//! rewritten atomically (temp file in the same directory, then rename).
//! The store does whole-file read-modify-write; callers sharing a store
//! across threads serialize writes themselves.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{ConfigUpdate, DeviceConfig, Expense, ExpenseDraft, Ledger, NewExpense};

const EXPENSES_FILE: &str = "expenses.json";
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the default data directory
pub const DATA_DIR_ENV: &str = "WALLETCARE_DATA_DIR";

/// Default data directory (~/.local/share/walletcare/data on Linux)
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    dirs::data_local_dir()
        .map(|d| d.join("walletcare").join("data"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Current local time in ISO-8601 without offset (e.g. 2024-03-10T14:05:00.123456)
pub fn now_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Reject ids that are empty or could escape the data root
pub fn validate_device_id(device_id: &str) -> Result<()> {
    if device_id.is_empty() {
        return Err(Error::InvalidData("device_id required".into()));
    }
    if !device_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::InvalidData(format!(
            "Invalid device_id: {}",
            device_id
        )));
    }
    Ok(())
}

/// File-backed store of expenses and settings, one directory per device
#[derive(Debug, Clone)]
pub struct DeviceStore {
    root: PathBuf,
}

impl DeviceStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| {
                Error::Storage(format!(
                    "Failed to create data directory {}: {}",
                    root.display(),
                    e
                ))
            })?;
            info!("Created data directory: {}", root.display());
        }

        Ok(Self { root })
    }

    /// Data root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn device_dir(&self, device_id: &str) -> Result<PathBuf> {
        validate_device_id(device_id)?;
        Ok(self.root.join(device_id))
    }

    /// Create the device directory and default files if missing
    pub fn init_device(&self, device_id: &str) -> Result<PathBuf> {
        let dir = self.device_dir(device_id)?;

        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            debug!(device = device_id, "Created device directory");
        }

        let expenses_path = dir.join(EXPENSES_FILE);
        if !expenses_path.exists() {
            write_json(&expenses_path, &Ledger::default())?;
        }

        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            write_json(&config_path, &DeviceConfig::default())?;
        }

        Ok(dir)
    }

    /// Load the expense document for a device
    pub fn load_ledger(&self, device_id: &str) -> Result<Ledger> {
        let dir = self.init_device(device_id)?;
        read_json(&dir.join(EXPENSES_FILE))
    }

    fn save_ledger(&self, device_id: &str, ledger: &Ledger) -> Result<()> {
        let dir = self.init_device(device_id)?;
        write_json(&dir.join(EXPENSES_FILE), ledger)
    }

    /// All expenses of a device, in insertion order
    pub fn list_expenses(&self, device_id: &str) -> Result<Vec<Expense>> {
        Ok(self.load_ledger(device_id)?.expenses)
    }

    /// Persist a classifier draft, assigning id and timestamp
    pub fn add_draft(&self, device_id: &str, draft: ExpenseDraft) -> Result<Expense> {
        self.push_expense(device_id, |id| draft.into_expense(id, now_timestamp()))
    }

    /// Persist a manually entered expense
    ///
    /// The caller's timestamp is kept when present, otherwise "now" is used.
    pub fn add_expense(&self, device_id: &str, new: NewExpense) -> Result<Expense> {
        if !new.amount.is_finite() {
            return Err(Error::InvalidData(format!(
                "Invalid amount: {}",
                new.amount
            )));
        }

        self.push_expense(device_id, |id| Expense {
            id,
            amount: new.amount,
            category: new.category,
            description: new.description.trim().to_string(),
            is_impulsive: new.is_impulsive,
            timestamp: new
                .timestamp
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(now_timestamp),
        })
    }

    fn push_expense(&self, device_id: &str, build: impl FnOnce(i64) -> Expense) -> Result<Expense> {
        let mut ledger = self.load_ledger(device_id)?;

        let expense = build(ledger.expenses.len() as i64 + 1);
        ledger.expenses.push(expense.clone());
        self.save_ledger(device_id, &ledger)?;

        info!(
            device = device_id,
            id = expense.id,
            amount = expense.amount,
            category = %expense.category,
            "Expense recorded"
        );
        Ok(expense)
    }

    /// Drop all expenses of a device; settings are kept
    pub fn reset_expenses(&self, device_id: &str) -> Result<()> {
        self.save_ledger(device_id, &Ledger::default())?;
        info!(device = device_id, "Expenses reset");
        Ok(())
    }

    /// Load a device's settings
    pub fn load_config(&self, device_id: &str) -> Result<DeviceConfig> {
        let dir = self.init_device(device_id)?;
        read_json(&dir.join(CONFIG_FILE))
    }

    /// Overwrite a device's settings
    pub fn save_config(&self, device_id: &str, config: &DeviceConfig) -> Result<()> {
        let dir = self.init_device(device_id)?;
        write_json(&dir.join(CONFIG_FILE), config)
    }

    /// Apply a partial settings update and return the result
    pub fn update_config(&self, device_id: &str, update: ConfigUpdate) -> Result<DeviceConfig> {
        let mut config = self.load_config(device_id)?;
        update.apply(&mut config);
        self.save_config(device_id, &config)?;
        Ok(config)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| Error::Storage(format!("No parent directory for {}", path.display())))?;

    let mut file = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.write_all(b"\n")?;
    file.persist(path).map_err(|e| {
        Error::Storage(format!("Failed to write {}: {}", path.display(), e.error))
    })?;

    Ok(())
}

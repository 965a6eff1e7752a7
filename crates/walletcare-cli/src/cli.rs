//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// WalletCare - Tell it what you spent, it keeps the books
#[derive(Parser)]
#[command(name = "walletcare")]
#[command(about = "Personal expense assistant driven by plain-text messages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Data directory (one subdirectory per device)
    ///
    /// Defaults to $WALLETCARE_DATA_DIR, then the platform data directory.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a message without saving anything
    Classify {
        /// Message, e.g. "gastei 25 reais no lanche"
        message: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a message and save the expense it describes
    Chat {
        /// Device id
        #[arg(short, long, default_value = "local")]
        device: String,

        /// Message, e.g. "gastei 25 reais no lanche"
        message: String,
    },

    /// Record an expense by hand
    Add {
        /// Device id
        #[arg(short, long, default_value = "local")]
        device: String,

        /// Amount in reais
        #[arg(short, long)]
        amount: f64,

        /// Category: food, games, drinks, entertainment, other, non_essential
        #[arg(short, long, default_value = "other")]
        category: String,

        /// Free-text description
        #[arg(long, default_value = "")]
        description: String,

        /// Flag the expense as impulsive
        #[arg(long)]
        impulsive: bool,

        /// Timestamp (YYYY-MM-DD or ISO-8601); defaults to now
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded expenses, newest first
    List {
        /// Device id
        #[arg(short, long, default_value = "local")]
        device: String,

        /// Maximum number of expenses to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show spending insights
    Insights {
        /// Device id
        #[arg(short, long, default_value = "local")]
        device: String,
    },

    /// Show this month's dashboard
    Dashboard {
        /// Device id
        #[arg(short, long, default_value = "local")]
        device: String,
    },

    /// Show this month's investment suggestion
    Invest {
        /// Device id
        #[arg(short, long, default_value = "local")]
        device: String,
    },

    /// Generate the financial report
    Report {
        /// Device id
        #[arg(short, long, default_value = "local")]
        device: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or update device settings
    Config {
        /// Device id
        #[arg(short, long, default_value = "local")]
        device: String,

        /// Monthly income in reais
        #[arg(long)]
        income: Option<f64>,

        /// Monthly spending goal in reais
        #[arg(long)]
        goal: Option<f64>,

        /// UI theme (e.g. claro, escuro)
        #[arg(long)]
        theme: Option<String>,
    },

    /// Delete all expenses of a device (settings are kept)
    Reset {
        /// Device id
        #[arg(short, long, default_value = "local")]
        device: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (the web front end)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

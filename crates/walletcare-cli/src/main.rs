//! WalletCare CLI - Personal expense assistant
//!
//! Usage:
//!   walletcare chat "gastei 25 reais no lanche"   Classify and save an expense
//!   walletcare insights                           Show spending insights
//!   walletcare report --output relatorio.txt      Write the financial report
//!   walletcare serve --port 5000                  Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let data_dir = commands::resolve_data_dir(cli.data_dir.as_deref());

    match cli.command {
        Commands::Classify { message, json } => commands::cmd_classify(&message, json),
        Commands::Chat { device, message } => {
            let store = commands::open_store(&data_dir)?;
            commands::cmd_chat(&store, &device, &message)
        }
        Commands::Add {
            device,
            amount,
            category,
            description,
            impulsive,
            date,
        } => {
            let store = commands::open_store(&data_dir)?;
            commands::cmd_add(
                &store,
                &device,
                amount,
                &category,
                &description,
                impulsive,
                date.as_deref(),
            )
        }
        Commands::List { device, limit } => {
            let store = commands::open_store(&data_dir)?;
            commands::cmd_list(&store, &device, limit)
        }
        Commands::Insights { device } => {
            let store = commands::open_store(&data_dir)?;
            commands::cmd_insights(&store, &device)
        }
        Commands::Dashboard { device } => {
            let store = commands::open_store(&data_dir)?;
            commands::cmd_dashboard(&store, &device)
        }
        Commands::Invest { device } => {
            let store = commands::open_store(&data_dir)?;
            commands::cmd_invest(&store, &device)
        }
        Commands::Report { device, output } => {
            let store = commands::open_store(&data_dir)?;
            commands::cmd_report(&store, &device, output.as_deref())
        }
        Commands::Config {
            device,
            income,
            goal,
            theme,
        } => {
            let store = commands::open_store(&data_dir)?;
            commands::cmd_config(&store, &device, income, goal, theme)
        }
        Commands::Reset { device, yes } => {
            let store = commands::open_store(&data_dir)?;
            commands::cmd_reset(&store, &device, yes)
        }
        Commands::Serve {
            port,
            host,
            static_dir,
        } => commands::cmd_serve(&data_dir, &host, port, static_dir.as_deref()).await,
    }
}

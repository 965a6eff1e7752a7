//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use walletcare_server::ServerConfig;

use super::open_store;

pub async fn cmd_serve(
    data_dir: &Path,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting WalletCare web server...");
    println!("   Data: {}", data_dir.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let config = ServerConfig::from_env();
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 Allowed origins: {} (WALLETCARE_ALLOWED_ORIGINS)",
            config.allowed_origins.join(", ")
        );
    }
    if host != "127.0.0.1" && host != "localhost" {
        println!();
        println!("   ⚠️  No authentication - anyone on the network can read device data");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let store = open_store(data_dir)?;

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("static_dir path must be valid UTF-8"))
        .transpose()?;
    walletcare_server::serve(store, host, port, static_dir_str, config).await?;

    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

use policyhub::config::Config;
use policyhub::server::{self, AppState};

/// Get the config file path (~/.config/policyhub/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("policyhub")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(name = "policyhub", about = "Policy-listing service backed by a hosted datastore")]
struct Args {
    /// Path to the config file (default: ~/.config/policyhub/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config file and POLICYHUB_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for debug logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?
        .apply_env();
    if let Some(port) = args.port {
        config.listen_port = port;
    }

    let state = AppState::from_config(&config).context("Invalid datastore configuration")?;

    server::serve(config.listen_port, Arc::new(state)).await
}

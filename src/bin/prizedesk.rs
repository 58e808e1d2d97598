//! prizedesk binary
//!
//! Award tracker backend: inference gateway + record store adapter

use anyhow::Result;
use clap::Parser;
use prizedesk::config::AppConfig;
use prizedesk::gate::server::start_server;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// prizedesk: award tracker backend
#[derive(Parser, Debug)]
#[command(name = "prizedesk")]
#[command(about = "Award tracker backend: inference gateway + record store adapter", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Validate configuration and exit
    #[arg(long)]
    validate: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;

    // Override with CLI arguments
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if args.validate {
        validate_config(&config)?;
        return Ok(());
    }

    start_server(config).await
}

/// Print the resolved configuration and which handler groups are serviceable
fn validate_config(config: &AppConfig) -> Result<()> {
    println!("Configuration validation:");
    println!("  Listen: {}:{}", config.server.host, config.server.port);
    println!("  Completion endpoint: {}", config.llm.api_base);
    println!("  Model: {}", config.llm.model);
    println!("  Record store: {}", config.store.api_base);
    println!(
        "  Tables: {} / {}",
        config.store.awards_table, config.store.requirements_table
    );

    match config.llm.require_api_key() {
        Ok(_) => println!("  /api/ai: enabled"),
        Err(e) => println!("  /api/ai: disabled ({e})"),
    }

    let store_ready = config
        .store
        .require_api_key()
        .and_then(|_| config.store.require_base_id());
    match store_ready {
        Ok(_) => println!("  /api/data: enabled"),
        Err(e) => println!("  /api/data: disabled ({e})"),
    }

    if config.server.port < 1024 {
        anyhow::bail!("Invalid port: {} (must be >= 1024)", config.server.port);
    }

    println!("\n✓ Configuration is valid");
    Ok(())
}

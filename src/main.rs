//! Bookmarks CLI - standalone HTTP server for bookmark records

use bookmarks::{Config, Service};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookmarks")]
#[command(author = "Bookmarks Team")]
#[command(version)]
#[command(about = "Bookmarks - in-memory REST service for saved links", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.bookmarks/config.toml")]
    config: PathBuf,

    /// Override server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override server host
    #[arg(long)]
    host: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initialize a new config file with defaults
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config_path = bookmarks::config::expand_path(&args.config);

    // Handle --init flag before any log sink exists
    if args.init {
        if config_path.exists() {
            eprintln!("Config file already exists: {}", config_path.display());
            return Ok(());
        }
        Config::create_default(&config_path)?;
        println!("Created default config at: {}", config_path.display());
        return Ok(());
    }

    // Load configuration
    let config_found = config_path.exists();
    let mut config = if config_found {
        Config::from_file(&config_path)?
    } else {
        Config::default()
    };

    // Environment first, then CLI flags
    config.apply_env_overrides();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }

    let _log_guard = bookmarks::logging::init(&config.logging, &config.log_file(), args.verbose)?;

    if !config_found {
        tracing::warn!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
    }

    let service = Service::new(config)?;
    service.start_api_server().await?;

    Ok(())
}

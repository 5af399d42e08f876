//! Relaychat terminal client entry point.
//!
//! # Usage
//!
//! ```bash
//! # Connect to a local relay
//! relaychat --name alice
//!
//! # Connect elsewhere and keep a debug log
//! relaychat --server ws://chat.example:8080 --log-file relaychat.log --log-level debug
//! ```

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use relaychat_client::{ClientConfig, DEFAULT_ENDPOINT};
use relaychat_tui::{Runtime, SystemEnv, TerminalDriver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Relaychat terminal client
#[derive(Parser, Debug)]
#[command(name = "relaychat")]
#[command(about = "Terminal chat client with live typing previews")]
#[command(version)]
struct Args {
    /// Relay WebSocket URL
    #[arg(short, long, default_value = DEFAULT_ENDPOINT)]
    server: String,

    /// Pre-fill the display name field
    #[arg(short, long, default_value = "")]
    name: String,

    /// Write logs to this file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
        let file = File::create(path)?;

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }

    tracing::info!(endpoint = %args.server, "relaychat starting");

    let env = SystemEnv::new();
    let driver = TerminalDriver::new(env.clone())?;
    let runtime = Runtime::new(driver, env, ClientConfig::with_endpoint(args.server), args.name);

    Ok(runtime.run().await?)
}

//! xMatters notifier CLI
//!
//! Sends a test, up or down notification to xMatters.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::Level;
use xmatters_notifier::monitor::{Heartbeat, HeartbeatStatus, MonitorInfo};
use xmatters_notifier::{load_config, XMattersError};

#[derive(Parser)]
#[command(name = "xmatters-notify")]
#[command(about = "Send monitor alerts to xMatters")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Send the test-button notification
    Test {
        #[arg(short, long, default_value = "Uptime Kuma test notification")]
        message: String,
    },
    /// Report a monitor as up
    Up {
        /// Path to the monitor record (JSON)
        #[arg(long)]
        monitor: PathBuf,
        #[arg(short, long, default_value = "")]
        message: String,
    },
    /// Report a monitor as down
    Down {
        /// Path to the monitor record (JSON)
        #[arg(long)]
        monitor: PathBuf,
        #[arg(short, long, default_value = "")]
        message: String,
    },
}

fn load_monitor(path: &Path) -> Result<MonitorInfo, XMattersError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        XMattersError::Config(format!("Failed to read monitor file {:?}: {}", path, e))
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );

    let mut config = load_config(&args.config)?;
    config.resolve_secrets()?;

    let (message, monitor, heartbeat) = match args.command {
        Command::Test { message } => (message, None, None),
        Command::Up { monitor, message } => (
            message,
            Some(load_monitor(&monitor)?),
            Some(Heartbeat {
                status: HeartbeatStatus::Up,
                msg: None,
            }),
        ),
        Command::Down { monitor, message } => (
            message,
            Some(load_monitor(&monitor)?),
            Some(Heartbeat {
                status: HeartbeatStatus::Down,
                msg: None,
            }),
        ),
    };

    tracing::info!("Sending {} notification", config.notifier.type_name());
    match xmatters_notifier::run(&config, &message, monitor.as_ref(), heartbeat.as_ref()).await? {
        Some(confirmation) => println!("{}", confirmation),
        None => println!("No notification sent"),
    }

    Ok(())
}

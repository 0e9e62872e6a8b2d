//! pumplink - Command-line companion for the PasswordPump
//!
//! Lists candidate serial ports and drives the device's credential-entry
//! handshake from a terminal.

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "pumplink")]
#[command(author, version, about = "PasswordPump credential provisioning CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PUMPLINK_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List candidate serial ports
    Ports,

    /// Run one credential-entry session against the device
    Provision {
        /// Serial port name (e.g. /dev/ttyACM0 or COM3)
        #[arg(short, long, env = "PUMPLINK_PORT")]
        port: Option<String>,

        /// Baud rate (the PasswordPump talks at 38400)
        #[arg(short, long)]
        baud: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    let no_color = cli.no_color || config.no_color.unwrap_or(false);
    let ctx = OutputContext::new(cli.output, no_color, cli.quiet);

    match &cli.command {
        Commands::Ports => commands::ports(&ctx),

        Commands::Provision { port, baud } => {
            let merged = config.merge_with_args(port.as_deref(), *baud);
            let port = merged.port.context(
                "No port given; pass --port or set one in the config file \
                 (run `pumplink ports` to list candidates)",
            )?;
            commands::provision(&port, merged.baud, &ctx).await
        }
    }
}

//! CLI entry point for posting pipeline and alarm notifications.
//!
//! Reads one delivery envelope from a file or stdin, runs the matching
//! handler, and prints the structured response as JSON. The exit code is
//! zero only when delivery was confirmed.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vectra_notify::{handle_alarm, handle_pipeline, Config, WebhookClient};

/// Format and forward operational events to Slack
#[derive(Parser)]
#[command(name = "vectra-notify")]
#[command(about = "Format and forward pipeline and alarm events to Slack")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Forward a CI/CD pipeline event envelope
    Pipeline {
        /// Envelope JSON file (reads stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Forward a monitoring-alarm state-change envelope
    Alarm {
        /// Envelope JSON file (reads stdin when omitted)
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = Config::from_env();
    let client = WebhookClient::new();

    let response = match cli.command {
        Commands::Pipeline { file } => {
            let raw = read_envelope(file.as_deref())?;
            handle_pipeline(&config, &client, &raw).await
        }
        Commands::Alarm { file } => {
            let raw = read_envelope(file.as_deref())?;
            handle_alarm(&config, &client, &raw).await
        }
    };

    println!("{}", serde_json::to_string(&response)?);

    if response.status_code != 200 {
        std::process::exit(1);
    }
    Ok(())
}

fn read_envelope(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read envelope from {}", path.display())),
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read envelope from stdin")?;
            Ok(raw)
        }
    }
}

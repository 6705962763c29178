use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "fleetgate",
    about = "Fleetgate — per-node canary rollout decisions",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a requirement document for this node.
    ///
    /// Reads the JSON document a version authority publishes (minimum,
    /// suggested, rollout stage) and prints whether this node should
    /// upgrade, and why.
    Decide {
        /// Version currently running on this node (e.g. v1.2.3)
        #[arg(long)]
        current: String,
        /// Node identity: 64 hex chars, or @path to a file containing them
        #[arg(long)]
        identity: String,
        /// Path to the requirement document (JSON)
        #[arg(long)]
        requirement: PathBuf,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Print the rollout cursor for a percentage
    Cursor {
        /// Rollout percentage, 0-100 (fractions allowed)
        percent: f64,
        /// Use the historical integer mapping
        #[arg(long)]
        legacy: bool,
    },
    /// Print build information
    Info {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> anyhow::Result<()> {
    fleetgate_process::init_telemetry(&fleetgate_process::TelemetryConfig::default())?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Decide {
            current,
            identity,
            requirement,
            format,
        } => commands::decide::run(&current, &identity, &requirement, &format),
        Commands::Cursor { percent, legacy } => commands::cursor::run(percent, legacy),
        Commands::Info { format } => commands::info::run(&format),
    }
}

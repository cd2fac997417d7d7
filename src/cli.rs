use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Alternative configuration file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: ServiceCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServiceCommand {
    /// Install the service if missing, then enable and start it
    Ensure {
        #[command(flatten)]
        unit: UnitArgs,
    },

    /// Stop, disable and uninstall the service
    Remove {
        /// Service name
        name: String,

        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Print the unit file without installing it
    Render {
        #[command(flatten)]
        unit: UnitArgs,
    },
}

#[derive(Debug, Args)]
pub struct UnitArgs {
    /// Service name
    pub name: String,

    /// Command line to run
    #[arg(long, value_name = "CMD")]
    pub exec_start: String,

    /// Restart policy (defaults to the configured value)
    #[arg(long)]
    pub restart: Option<String>,

    /// Delay between restarts (defaults to the configured value)
    #[arg(long, value_name = "DELAY")]
    pub restart_sec: Option<String>,
}

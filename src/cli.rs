use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "provup",
    about = "Provisioning helper - install pending OS updates and vendor diagnostics",
    version,
    author
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true, env = "PROVUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search, download and install every pending update, then reboot if required
    Update {
        /// Append run log lines to this file instead of the configured one
        #[arg(long, value_name = "PATH")]
        log_file: Option<PathBuf>,

        /// Never restart the machine, even when the installation asks for it
        #[arg(long)]
        no_reboot: bool,

        /// Event log source name used for notification entries
        #[arg(long, value_name = "NAME")]
        event_source: Option<String>,
    },

    /// List pending updates without downloading or installing anything
    Check,

    /// Download and silently install the vendor diagnostic tool
    Diagnostics {
        /// Installer package URL (must be https)
        #[arg(long)]
        url: Option<String>,
    },
}

mod cli;
mod config;
mod diagnostics;
mod error;
mod sinks;
mod update;
mod utils;
mod windows_update;
mod workflow;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use config::Config;
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "provup=debug" } else { "provup=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = Config::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Update {
            log_file,
            no_reboot,
            event_source,
        } => workflow::execute_update(&config, log_file, no_reboot, event_source),
        Commands::Check => workflow::execute_check(),
        Commands::Diagnostics { url } => workflow::execute_diagnostics(&config, url),
    });

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

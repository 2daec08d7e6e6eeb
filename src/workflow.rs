use crate::config::{Config, RebootPolicy};
use crate::diagnostics::DiagnosticsInstaller;
use crate::error::{ProvupError, Result};
use crate::sinks::{EventLogSink, FileRunLog, ShutdownReboot};
use crate::update::{RunLog, RunOutcome, SearchFilter, UpdateOrchestrator, UpdateSearcher};
use crate::windows_update::WindowsUpdateClient;
use colored::Colorize;
use std::path::PathBuf;

/// Execute one full update run against the local update service
pub fn execute_update(
    config: &Config,
    log_file: Option<PathBuf>,
    no_reboot: bool,
    event_source: Option<String>,
) -> Result<()> {
    let log_path = log_file.unwrap_or_else(|| config.log.path.clone());
    let log = FileRunLog::open(&log_path)?;
    tracing::debug!(path = %log.path().display(), "run log opened");
    let events = EventLogSink::new(
        config.events.log.as_str(),
        event_source.unwrap_or_else(|| config.events.source.clone()),
    );
    let client = WindowsUpdateClient::new();
    let reboot = ShutdownReboot;

    let orchestrator = UpdateOrchestrator::new(&client, &client, &client, &log, &events, &reboot)
        .with_reboot_policy(reboot_policy(config, no_reboot));

    let outcome = run_and_report(&orchestrator, &log)?;
    tracing::info!("update run finished: {}", describe(&outcome));
    Ok(())
}

/// Run the orchestrator, writing a fatal error to the run log exactly once.
fn run_and_report(orchestrator: &UpdateOrchestrator<'_>, log: &dyn RunLog) -> Result<RunOutcome> {
    orchestrator.run().inspect_err(|e| log.write(&format!("Error: {e}")))
}

/// List pending updates without touching them
pub fn execute_check() -> Result<()> {
    println!("{}", "Searching for pending updates...".cyan().bold());

    let client = WindowsUpdateClient::new();
    let items = client.search(SearchFilter::NotInstalled)?;

    if items.is_empty() {
        println!("{}", "✓ No missing updates found".green());
        return Ok(());
    }

    println!("\n{} pending update(s):", items.len());
    for item in &items {
        let state = if item.is_downloaded {
            "downloaded".green()
        } else {
            "not downloaded".yellow()
        };
        println!("  • {} ({})", item.title.bright_cyan(), state);
    }
    Ok(())
}

/// Download and silently install the vendor diagnostic tool
pub fn execute_diagnostics(config: &Config, url: Option<String>) -> Result<()> {
    let url = installer_url(config, url)?;
    println!("{}", "Installing vendor diagnostics...".cyan().bold());

    println!("\n{}", "Downloading and running installer...".yellow());
    let installer = DiagnosticsInstaller::new(config.diagnostics.args.clone())?;
    installer.install(&url)?;

    println!("{}", "✓ Diagnostics installed, installer removed".green());
    Ok(())
}

fn reboot_policy(config: &Config, no_reboot: bool) -> RebootPolicy {
    if no_reboot {
        RebootPolicy::Suppress
    } else {
        config.update.reboot
    }
}

fn installer_url(config: &Config, url: Option<String>) -> Result<String> {
    url.or_else(|| config.diagnostics.url.clone()).ok_or_else(|| {
        ProvupError::Config(
            "No installer URL configured. Pass --url or set [diagnostics] url".to_string(),
        )
    })
}

fn describe(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::NoUpdates => "no updates found".to_string(),
        RunOutcome::NothingToInstall => "nothing to install".to_string(),
        RunOutcome::Installed { batch, rebooted } => format!(
            "{} update(s) processed, result {}, reboot {}",
            batch.items.len(),
            batch.result_code,
            if *rebooted { "triggered" } else { "not triggered" }
        ),
    }
}

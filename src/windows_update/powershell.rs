use crate::error::{ProvupError, Result};
use crate::utils::process;
use serde::de::DeserializeOwned;

/// Runs inline PowerShell scripts and decodes their JSON output.
pub struct PowerShell {
    program: &'static str,
}

impl Default for PowerShell {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerShell {
    pub fn new() -> Self {
        let program = if cfg!(target_os = "windows") {
            "powershell.exe"
        } else {
            "pwsh"
        };
        Self { program }
    }

    /// Execute `script` and parse everything it printed as JSON.
    pub fn run_json<T: DeserializeOwned>(&self, script: &str) -> Result<T> {
        let output = process::run(
            self.program,
            &[
                "-NoProfile",
                "-NonInteractive",
                "-ExecutionPolicy",
                "Bypass",
                "-Command",
                script,
            ],
        )
        .map_err(|e| ProvupError::PowerShell(format!("Failed to start {}: {e}", self.program)))?;

        if !output.status.success() {
            return Err(ProvupError::PowerShell(process::failure_detail(&output)));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_json(&stdout)
    }
}

fn parse_json<T: DeserializeOwned>(stdout: &str) -> Result<T> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Err(ProvupError::PowerShell(
            "script produced no output".to_string(),
        ));
    }
    Ok(serde_json::from_str(trimmed)?)
}

use crate::error::{ProvupError, Result};
use crate::update::RebootTrigger;
use crate::utils::process;

const WINDOWS_ARGS: &[&str] = &["/r", "/f", "/t", "0"];
const UNIX_ARGS: &[&str] = &["-r", "now"];

/// Forced, immediate restart with no user prompt.
pub struct ShutdownReboot;

impl ShutdownReboot {
    fn command() -> (&'static str, &'static [&'static str]) {
        let args = if cfg!(target_os = "windows") {
            WINDOWS_ARGS
        } else {
            UNIX_ARGS
        };
        ("shutdown", args)
    }
}

impl RebootTrigger for ShutdownReboot {
    fn reboot(&self) -> Result<()> {
        let (program, args) = Self::command();
        tracing::info!("requesting forced restart");

        let output = process::run(program, args)
            .map_err(|e| ProvupError::Reboot(format!("Failed to run {program}: {e}")))?;
        if !output.status.success() {
            return Err(ProvupError::Reboot(process::failure_detail(&output)));
        }
        Ok(())
    }
}

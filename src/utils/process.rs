use std::io;
use std::process::{Command, Output};

/// Run a program to completion, capturing stdout and stderr.
pub fn run(program: &str, args: &[&str]) -> io::Result<Output> {
    tracing::debug!(program, ?args, "executing");
    let output = Command::new(program).args(args).output()?;
    tracing::debug!(program, status = ?output.status.code(), "finished");
    Ok(output)
}

/// Human-readable reason for a failed invocation.
pub fn failure_detail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let code = output
        .status
        .code()
        .map_or_else(|| "signal".to_string(), |code| code.to_string());

    if stderr.is_empty() {
        format!("exit code {code}")
    } else {
        format!("exit code {code}: {stderr}")
    }
}

//! Subprocess plumbing shared by the X11 tool adapters.
//!
//! Every call carries a timeout so a hung X server cannot wedge command
//! processing; the child is killed when the timeout fires.

use crate::{Result, XsnapError};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Ceiling for a single external tool invocation
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(2);

/// Captured result of a finished tool invocation
pub(crate) struct ToolOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a tool to completion. Spawn failures and timeouts are errors; a
/// non-zero exit status is reported through [`ToolOutput::success`] so callers
/// that treat it as a normal condition can.
pub(crate) async fn run_tool(program: &str, args: &[&str], limit: Duration) -> Result<ToolOutput> {
    let child = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output();

    let output = match timeout(limit, child).await {
        Ok(result) => result.map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => XsnapError::ToolMissing(program.to_string()),
            _ => XsnapError::ToolFailed(program.to_string(), err.to_string()),
        })?,
        Err(_) => {
            return Err(
                XsnapError::ToolTimeout(program.to_string(), limit.as_millis() as u64).into(),
            )
        }
    };

    Ok(ToolOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Like [`run_tool`] but treats a non-zero exit status as an error
pub(crate) async fn run_tool_checked(
    program: &str,
    args: &[&str],
    limit: Duration,
) -> Result<String> {
    let output = run_tool(program, args, limit).await?;
    if !output.success {
        return Err(XsnapError::ToolFailed(
            program.to_string(),
            output.stderr.trim().to_string(),
        )
        .into());
    }
    Ok(output.stdout)
}

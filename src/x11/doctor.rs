//! Startup checks for the external tools xsnap drives.
//!
//! xdotool and xrandr are load-bearing; notify-send only backs optional
//! notifications, so its absence is a warning rather than a launch failure.

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

pub const REQUIRED_TOOLS: [&str; 2] = ["xdotool", "xrandr"];
pub const OPTIONAL_TOOLS: [&str; 1] = ["notify-send"];

/// Availability of one external tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReport {
    pub tool: &'static str,
    pub found: bool,
    pub required: bool,
}

/// Checks every tool against the current PATH
pub fn check_tools() -> Vec<ToolReport> {
    let path_var = env::var_os("PATH").unwrap_or_default();
    check_tools_in(&path_var)
}

fn check_tools_in(path_var: &OsStr) -> Vec<ToolReport> {
    REQUIRED_TOOLS
        .iter()
        .map(|tool| (tool, true))
        .chain(OPTIONAL_TOOLS.iter().map(|tool| (tool, false)))
        .map(|(tool, required)| ToolReport {
            tool,
            found: find_on_path(path_var, tool),
            required,
        })
        .collect()
}

/// Names of required tools that are absent
pub fn missing_required(reports: &[ToolReport]) -> Vec<&'static str> {
    reports
        .iter()
        .filter(|report| report.required && !report.found)
        .map(|report| report.tool)
        .collect()
}

fn find_on_path(path_var: &OsStr, tool: &str) -> bool {
    env::split_paths(path_var).any(|dir| is_executable(&dir.join(tool)))
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

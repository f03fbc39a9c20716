//! xsnap - Context-Aware Window Snapping for X11 Desktops
//!
//! xsnap moves the active window between halves, corner quadrants, and a
//! maximized frame with directional commands, re-deriving the window's tiling
//! state from its live geometry on every event so it never drifts out of sync
//! with windows moved by other tools.

pub mod cli;
pub mod config;
pub mod ipc;
pub mod logging;
pub mod models;
pub mod services;
pub mod ui;
pub mod x11;

pub use models::*;
pub use services::*;

/// Result type alias for xsnap operations
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to xsnap operations
#[derive(thiserror::Error, Debug)]
pub enum XsnapError {
    #[error("Required tool missing from PATH: {0}")]
    ToolMissing(String),

    #[error("{0} failed: {1}")]
    ToolFailed(String, String),

    #[error("{0} timed out after {1} ms")]
    ToolTimeout(String, u64),

    #[error("Unexpected {0} output: {1}")]
    ToolOutput(String, String),

    #[error("Window not found: {0}")]
    WindowNotFound(u64),

    #[error("No connected display reported by the window system")]
    NoDisplay,

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("IPC error: {0}")]
    IpcError(String),
}

use crate::config::Settings;
use crate::models::{Direction, TilingState};
use crate::services::SnapMetrics;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound on a request line. Real requests are well under 100 bytes.
pub const MAX_REQUEST_BYTES: u64 = 4096;

/// Where the daemon listens. Prefers the per-user runtime directory so the
/// socket disappears with the session.
pub fn socket_path() -> PathBuf {
    std::env::var_os("XDG_RUNTIME_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join("xsnap.sock")
}

/// A client sends exactly one request per connection, as a single JSON line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    Snap { direction: Direction },
    Apply { layout: TilingState },
    Reload,
    Status,
    Quit,
}

/// Single JSON line answered by the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response {
    Ok {
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Report(StatusReport),
    Error {
        message: String,
    },
}

impl Response {
    pub fn ok() -> Self {
        Response::Ok { message: None }
    }

    pub fn ok_with(message: impl Into<String>) -> Self {
        Response::Ok {
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            message: message.into(),
        }
    }
}

/// Daemon health snapshot answered to a `Status` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    pub version: String,
    pub started_at: DateTime<Utc>,
    pub settings: Settings,
    pub metrics: SnapMetrics,
}

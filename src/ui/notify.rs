//! Desktop notifications through notify-send.

use crate::x11::tool::{run_tool_checked, DEFAULT_TOOL_TIMEOUT};
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;

const NOTIFICATION_ICON: &str = "preferences-desktop-display";
const NOTIFICATION_EXPIRE_MS: u32 = 2000;

/// Sink for user-facing notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, summary: &str, body: &str) -> Result<()>;
}

/// notify-send backed notifier
pub struct DesktopNotifier {
    timeout: Duration,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, summary: &str, body: &str) -> Result<()> {
        let expire = NOTIFICATION_EXPIRE_MS.to_string();
        run_tool_checked(
            "notify-send",
            &[
                "--icon",
                NOTIFICATION_ICON,
                "--app-name",
                "xsnap",
                "--expire-time",
                &expire,
                summary,
                body,
            ],
            self.timeout,
        )
        .await?;
        Ok(())
    }
}

/// Captures notifications instead of displaying them
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, summary: &str, body: &str) -> Result<()> {
        self.messages
            .lock()
            .await
            .push((summary.to_string(), body.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn recording_notifier_captures_in_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify("first", "a").await.unwrap();
        notifier.notify("second", "b").await.unwrap();

        let messages = notifier.messages().await;
        assert_eq!(
            messages,
            vec![
                ("first".to_string(), "a".to_string()),
                ("second".to_string(), "b".to_string()),
            ]
        );
    }
}

use crate::config::Settings;
use crate::models::{Direction, Rect, TilingState};
use crate::services::{classify, synthesize, transition};
use crate::ui::Notifier;
use crate::x11::{pick_work_area, DisplayLayout, WindowSystem};
use crate::{Result, XsnapError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Telemetry for snap operations, reported through `status`
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapMetrics {
    pub snaps_applied: u64,
    pub manual_applies: u64,
    pub noops: u64,
    pub no_active_window: u64,
    pub aborted: u64,
    pub settings_reloads: u64,
}

/// What a snap or apply request did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapOutcome {
    Applied {
        window: u64,
        from: TilingState,
        to: TilingState,
        rect: Rect,
    },
    AlreadyInPlace {
        window: u64,
        state: TilingState,
    },
    NoActiveWindow,
}

impl SnapOutcome {
    /// Human readable summary for notifications and CLI output
    pub fn describe(&self) -> String {
        match self {
            SnapOutcome::Applied { to, .. } => format!("Snapped to {}", to.title()),
            SnapOutcome::AlreadyInPlace { state, .. } => format!("Already {}", state.title()),
            SnapOutcome::NoActiveWindow => "No active window".to_string(),
        }
    }
}

/// Drives the full snap pipeline for one event: query the active window,
/// re-derive its tiling state from live geometry, pick the next state, and
/// push the synthesized frame back to the window system.
///
/// The coordinator holds no per-window state between events, so windows moved
/// by other tools are picked up correctly on their next snap.
pub struct SnapCoordinator {
    windows: Arc<dyn WindowSystem>,
    displays: Arc<dyn DisplayLayout>,
    notifier: Arc<dyn Notifier>,
    settings: Arc<RwLock<Settings>>,
    metrics: Arc<RwLock<SnapMetrics>>,
}

impl SnapCoordinator {
    pub fn new(
        windows: Arc<dyn WindowSystem>,
        displays: Arc<dyn DisplayLayout>,
        notifier: Arc<dyn Notifier>,
        settings: Settings,
    ) -> Self {
        Self {
            windows,
            displays,
            notifier,
            settings: Arc::new(RwLock::new(settings)),
            metrics: Arc::new(RwLock::new(SnapMetrics::default())),
        }
    }

    /// Move the active window one step in the given direction.
    pub async fn snap(&self, direction: Direction) -> Result<SnapOutcome> {
        let Some(window) = self.active_window().await? else {
            self.metrics.write().await.no_active_window += 1;
            debug!("Snap {} ignored: no active window", direction);
            return Ok(SnapOutcome::NoActiveWindow);
        };

        let (current, work_area, settings) = self.window_context(window).await?;
        let from = classify(current, work_area, settings.margins, settings.tolerance_px);
        let to = transition(from, direction);
        debug!(
            "Snap {}: window {} classified {} -> target {}",
            direction, window, from, to
        );

        let outcome = self
            .place(window, from, to, current, work_area, &settings)
            .await?;
        if matches!(outcome, SnapOutcome::Applied { .. }) {
            self.metrics.write().await.snaps_applied += 1;
        }
        Ok(outcome)
    }

    /// Place the active window directly into a named layout, bypassing the
    /// transition step.
    pub async fn apply(&self, target: TilingState) -> Result<SnapOutcome> {
        let Some(window) = self.active_window().await? else {
            self.metrics.write().await.no_active_window += 1;
            debug!("Apply {} ignored: no active window", target);
            return Ok(SnapOutcome::NoActiveWindow);
        };

        let (current, work_area, settings) = self.window_context(window).await?;
        let from = classify(current, work_area, settings.margins, settings.tolerance_px);

        let outcome = self
            .place(window, from, target, current, work_area, &settings)
            .await?;
        if matches!(outcome, SnapOutcome::Applied { .. }) {
            self.metrics.write().await.manual_applies += 1;
        }
        Ok(outcome)
    }

    /// Swap in freshly loaded settings. Takes effect on the next event.
    pub async fn replace_settings(&self, settings: Settings) {
        *self.settings.write().await = settings;
        self.metrics.write().await.settings_reloads += 1;
        info!("Settings replaced");
    }

    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    pub async fn metrics(&self) -> SnapMetrics {
        self.metrics.read().await.clone()
    }

    async fn active_window(&self) -> Result<Option<u64>> {
        match self.windows.active_window().await {
            Ok(active) => Ok(active),
            Err(err) => {
                self.increment_aborted().await;
                Err(err)
            }
        }
    }

    /// Query everything one placement decision needs: the window's live
    /// geometry, the work area of the display under its origin, and a
    /// settings snapshot so one event never sees a half-applied reload.
    async fn window_context(&self, window: u64) -> Result<(Rect, Rect, Settings)> {
        let current = match self.windows.window_rect(window).await {
            Ok(rect) => rect,
            Err(err) => {
                self.increment_aborted().await;
                return Err(err);
            }
        };

        let displays = match self.displays.displays().await {
            Ok(displays) => displays,
            Err(err) => {
                self.increment_aborted().await;
                return Err(err);
            }
        };

        let Some(work_area) = pick_work_area(&displays, current.x, current.y) else {
            self.increment_aborted().await;
            return Err(XsnapError::NoDisplay.into());
        };

        let settings = self.settings.read().await.clone();
        Ok((current, work_area, settings))
    }

    async fn place(
        &self,
        window: u64,
        from: TilingState,
        to: TilingState,
        current: Rect,
        work_area: Rect,
        settings: &Settings,
    ) -> Result<SnapOutcome> {
        let target = synthesize(to, work_area, settings.margins);

        if target == current {
            self.metrics.write().await.noops += 1;
            debug!("Window {} already at {}, skipping move", window, to);
            return Ok(SnapOutcome::AlreadyInPlace { window, state: to });
        }

        if let Err(err) = self.windows.set_window_rect(window, target).await {
            self.increment_aborted().await;
            return Err(err);
        }

        info!("Window {} snapped {} -> {} at {}", window, from, to, target);

        let outcome = SnapOutcome::Applied {
            window,
            from,
            to,
            rect: target,
        };

        if settings.notify_on_apply {
            if let Err(err) = self.notifier.notify("xsnap", &outcome.describe()).await {
                debug!("Notification failed: {}", err);
            }
        }

        Ok(outcome)
    }

    async fn increment_aborted(&self) {
        self.metrics.write().await.aborted += 1;
    }
}

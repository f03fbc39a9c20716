//! Window-system access through xdotool.
//!
//! The [`WindowSystem`] trait is the seam between the decision engine and the
//! desktop: the engine only ever reads the focused window's rectangle and
//! writes a new one. [`XdoWindowSystem`] drives the real desktop,
//! [`InMemoryWindowSystem`] backs the tests.

use crate::models::Rect;
use crate::x11::tool::{run_tool, run_tool_checked, DEFAULT_TOOL_TIMEOUT};
use crate::{Result, XsnapError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Abstraction over the windowing system's read and write surface
#[async_trait]
pub trait WindowSystem: Send + Sync {
    /// Identifier of the focused window, or `None` when nothing has focus
    async fn active_window(&self) -> Result<Option<u64>>;

    /// Current bounding rectangle of a window
    async fn window_rect(&self, window: u64) -> Result<Rect>;

    /// Move and resize a window to the requested rectangle
    async fn set_window_rect(&self, window: u64, rect: Rect) -> Result<()>;
}

/// xdotool-backed window system
pub struct XdoWindowSystem {
    timeout: Duration,
}

impl XdoWindowSystem {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for XdoWindowSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WindowSystem for XdoWindowSystem {
    async fn active_window(&self) -> Result<Option<u64>> {
        // xdotool exits non-zero when no window has input focus; that is a
        // normal condition, not a failure.
        let output = run_tool("xdotool", &["getwindowfocus"], self.timeout).await?;
        if !output.success {
            debug!("No focused window reported");
            return Ok(None);
        }

        let raw = output.stdout.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        let id = raw.parse::<u64>().map_err(|_| {
            XsnapError::ToolOutput("xdotool".to_string(), format!("window id {raw:?}"))
        })?;
        Ok(Some(id))
    }

    async fn window_rect(&self, window: u64) -> Result<Rect> {
        let id = window.to_string();
        let output = run_tool_checked(
            "xdotool",
            &["getwindowgeometry", "--shell", &id],
            self.timeout,
        )
        .await?;

        parse_shell_geometry(&output).ok_or_else(|| {
            XsnapError::ToolOutput(
                "xdotool".to_string(),
                format!("geometry for window {window}: {:?}", output.trim()),
            )
            .into()
        })
    }

    async fn set_window_rect(&self, window: u64, rect: Rect) -> Result<()> {
        let id = window.to_string();

        // Tiled geometry only sticks once the window manager's own
        // maximize/fullscreen states are cleared.
        run_tool_checked(
            "xdotool",
            &[
                "windowstate",
                "--remove",
                "fullscreen,maximized_vert,maximized_horz",
                &id,
            ],
            self.timeout,
        )
        .await?;

        let width = rect.width.to_string();
        let height = rect.height.to_string();
        run_tool_checked("xdotool", &["windowsize", &id, &width, &height], self.timeout).await?;

        let x = rect.x.to_string();
        let y = rect.y.to_string();
        run_tool_checked("xdotool", &["windowmove", &id, &x, &y], self.timeout).await?;

        Ok(())
    }
}

/// Parses `xdotool getwindowgeometry --shell` output. Negative positions
/// (off-screen decorations) are clamped to the visible origin.
fn parse_shell_geometry(output: &str) -> Option<Rect> {
    let mut x = None;
    let mut y = None;
    let mut width = None;
    let mut height = None;

    for line in output.lines() {
        if let Some((key, value)) = line.split_once('=') {
            match key.trim() {
                "X" => x = value.trim().parse::<i32>().ok(),
                "Y" => y = value.trim().parse::<i32>().ok(),
                "WIDTH" => width = value.trim().parse::<u32>().ok(),
                "HEIGHT" => height = value.trim().parse::<u32>().ok(),
                _ => {}
            }
        }
    }

    Some(Rect::new(x?.max(0), y?.max(0), width?, height?))
}

#[derive(Debug, Default)]
struct InMemoryState {
    windows: HashMap<u64, Rect>,
    active: Option<u64>,
    fail_queries: bool,
    fail_moves: bool,
    moves: Vec<(u64, Rect)>,
}

/// In-memory window system for exercising the engine without a desktop
#[derive(Debug, Default)]
pub struct InMemoryWindowSystem {
    state: RwLock<InMemoryState>,
}

impl InMemoryWindowSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single window that also has focus
    pub fn with_window(window: u64, rect: Rect) -> Self {
        let mut windows = HashMap::new();
        windows.insert(window, rect);
        Self {
            state: RwLock::new(InMemoryState {
                windows,
                active: Some(window),
                ..Default::default()
            }),
        }
    }

    pub async fn insert_window(&self, window: u64, rect: Rect) {
        self.state.write().await.windows.insert(window, rect);
    }

    pub async fn set_active(&self, window: Option<u64>) {
        self.state.write().await.active = window;
    }

    pub async fn fail_queries(&self, fail: bool) {
        self.state.write().await.fail_queries = fail;
    }

    pub async fn fail_moves(&self, fail: bool) {
        self.state.write().await.fail_moves = fail;
    }

    pub async fn rect_of(&self, window: u64) -> Option<Rect> {
        self.state.read().await.windows.get(&window).copied()
    }

    /// Every write issued through the adapter, in order
    pub async fn moves(&self) -> Vec<(u64, Rect)> {
        self.state.read().await.moves.clone()
    }
}

#[async_trait]
impl WindowSystem for InMemoryWindowSystem {
    async fn active_window(&self) -> Result<Option<u64>> {
        let state = self.state.read().await;
        if state.fail_queries {
            return Err(
                XsnapError::ToolFailed("xdotool".to_string(), "query failure".to_string()).into(),
            );
        }
        Ok(state.active)
    }

    async fn window_rect(&self, window: u64) -> Result<Rect> {
        let state = self.state.read().await;
        if state.fail_queries {
            return Err(
                XsnapError::ToolFailed("xdotool".to_string(), "query failure".to_string()).into(),
            );
        }
        state
            .windows
            .get(&window)
            .copied()
            .ok_or_else(|| XsnapError::WindowNotFound(window).into())
    }

    async fn set_window_rect(&self, window: u64, rect: Rect) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_moves {
            return Err(
                XsnapError::ToolFailed("xdotool".to_string(), "move rejected".to_string()).into(),
            );
        }
        if !state.windows.contains_key(&window) {
            return Err(XsnapError::WindowNotFound(window).into());
        }
        state.windows.insert(window, rect);
        state.moves.push((window, rect));
        Ok(())
    }
}

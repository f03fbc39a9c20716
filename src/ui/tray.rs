//! Tray menu model and action dispatch.
//!
//! The menu is plain data so any indicator renderer can display it; xsnap
//! itself only decides what the entries are and what activating one does.

use crate::ipc::{EngineCommand, Request, Response};
use crate::models::{Direction, TilingState};
use crate::{Result, XsnapError};
use std::path::PathBuf;
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// What activating a menu entry means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    Snap(Direction),
    ApplyLayout(TilingState),
    OpenSettings,
    ReloadSettings,
    About,
    Quit,
}

/// One rendered menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    /// Insensitive section label
    Header { label: &'static str },
    Action {
        label: &'static str,
        action: TrayAction,
    },
    Submenu {
        label: &'static str,
        items: Vec<MenuEntry>,
    },
    Separator,
}

impl MenuEntry {
    fn header(label: &'static str) -> Self {
        MenuEntry::Header { label }
    }

    fn action(label: &'static str, action: TrayAction) -> Self {
        MenuEntry::Action { label, action }
    }

    fn submenu(label: &'static str, items: Vec<MenuEntry>) -> Self {
        MenuEntry::Submenu { label, items }
    }

    fn layout(state: TilingState) -> Self {
        MenuEntry::Action {
            label: state.title(),
            action: TrayAction::ApplyLayout(state),
        }
    }
}

/// The full indicator menu.
pub fn build_menu() -> Vec<MenuEntry> {
    vec![
        MenuEntry::header("Context-Aware Tiling"),
        MenuEntry::action(
            "Snap Left (Super + Alt + \u{2190})",
            TrayAction::Snap(Direction::Left),
        ),
        MenuEntry::action(
            "Snap Right (Super + Alt + \u{2192})",
            TrayAction::Snap(Direction::Right),
        ),
        MenuEntry::action(
            "Snap Up (Super + Alt + \u{2191})",
            TrayAction::Snap(Direction::Up),
        ),
        MenuEntry::action(
            "Snap Down (Super + Alt + \u{2193})",
            TrayAction::Snap(Direction::Down),
        ),
        MenuEntry::Separator,
        MenuEntry::header("Manual Layouts"),
        MenuEntry::submenu(
            "Single Window",
            vec![MenuEntry::layout(TilingState::Maximized)],
        ),
        MenuEntry::submenu(
            "Halves",
            vec![
                MenuEntry::layout(TilingState::LeftHalf),
                MenuEntry::layout(TilingState::RightHalf),
                MenuEntry::Separator,
                MenuEntry::layout(TilingState::TopHalf),
                MenuEntry::layout(TilingState::BottomHalf),
            ],
        ),
        MenuEntry::submenu(
            "Corners",
            vec![
                MenuEntry::layout(TilingState::TopLeftQuadrant),
                MenuEntry::layout(TilingState::TopRightQuadrant),
                MenuEntry::layout(TilingState::BottomLeftQuadrant),
                MenuEntry::layout(TilingState::BottomRightQuadrant),
            ],
        ),
        MenuEntry::Separator,
        MenuEntry::header("xsnap"),
        MenuEntry::action("Settings...", TrayAction::OpenSettings),
        MenuEntry::action("Reload Config", TrayAction::ReloadSettings),
        MenuEntry::action("About", TrayAction::About),
        MenuEntry::Separator,
        MenuEntry::action("Quit", TrayAction::Quit),
    ]
}

/// Routes activated menu entries either into the engine command channel or
/// out to the desktop (settings file, project page).
pub struct TrayDispatcher {
    commands: mpsc::Sender<EngineCommand>,
    settings_path: PathBuf,
}

impl TrayDispatcher {
    pub fn new(commands: mpsc::Sender<EngineCommand>, settings_path: PathBuf) -> Self {
        Self {
            commands,
            settings_path,
        }
    }

    pub async fn dispatch(&self, action: TrayAction) -> Result<()> {
        match action {
            TrayAction::Snap(direction) => self.forward(Request::Snap { direction }).await,
            TrayAction::ApplyLayout(layout) => self.forward(Request::Apply { layout }).await,
            TrayAction::ReloadSettings => self.forward(Request::Reload).await,
            TrayAction::Quit => self.forward(Request::Quit).await,
            TrayAction::OpenSettings => {
                let path = self.settings_path.display().to_string();
                open_external(&path);
                Ok(())
            }
            TrayAction::About => {
                open_external(env!("CARGO_PKG_REPOSITORY"));
                Ok(())
            }
        }
    }

    async fn forward(&self, request: Request) -> Result<()> {
        let (command, reply) = EngineCommand::from_request(request);
        self.commands
            .send(command)
            .await
            .map_err(|_| XsnapError::IpcError("engine command channel closed".to_string()))?;

        match reply.await {
            Ok(Response::Error { message }) => warn!("Tray action failed: {}", message),
            Ok(_) => {}
            Err(_) => warn!("Tray action went unanswered"),
        }
        Ok(())
    }
}

/// Hand a file or URL to the desktop's opener without waiting on it.
fn open_external(target: &str) {
    match Command::new("xdg-open").arg(target).spawn() {
        Ok(_) => debug!("Opened {} via xdg-open", target),
        Err(err) => warn!("xdg-open {} failed: {}", target, err),
    }
}

//! Unix socket IPC between the daemon and its clients

pub mod client;
pub mod server;
pub mod wire;

pub use client::IpcClient;
pub use server::IpcServer;
pub use wire::{socket_path, Request, Response, StatusReport};

use crate::models::{Direction, TilingState};
use tokio::sync::oneshot;

/// Commands delivered into the daemon's single engine task.
///
/// Every command carries a reply channel, so clients observe outcomes without
/// sharing engine state, and the single consumer keeps event handling serial.
#[derive(Debug)]
pub enum EngineCommand {
    Snap {
        direction: Direction,
        reply: oneshot::Sender<Response>,
    },
    Apply {
        layout: TilingState,
        reply: oneshot::Sender<Response>,
    },
    Reload {
        reply: oneshot::Sender<Response>,
    },
    Status {
        reply: oneshot::Sender<Response>,
    },
    Quit {
        reply: oneshot::Sender<Response>,
    },
}

impl EngineCommand {
    /// Pair a wire request with its reply channel.
    pub fn from_request(request: Request) -> (Self, oneshot::Receiver<Response>) {
        let (reply, receiver) = oneshot::channel();
        let command = match request {
            Request::Snap { direction } => EngineCommand::Snap { direction, reply },
            Request::Apply { layout } => EngineCommand::Apply { layout, reply },
            Request::Reload => EngineCommand::Reload { reply },
            Request::Status => EngineCommand::Status { reply },
            Request::Quit => EngineCommand::Quit { reply },
        };
        (command, receiver)
    }
}

//! User-facing surfaces: desktop notifications and the tray menu model

pub mod notify;
pub mod tray;

pub use notify::*;
pub use tray::*;

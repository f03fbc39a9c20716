//! X11 integration layer for xsnap
//!
//! These modules wrap the external command-line tools (xdotool, xrandr) in
//! safe, testable abstractions. The concrete implementations talk to the
//! desktop while unit tests rely on in-memory stand-ins.

pub mod adapter;
pub mod displays;
pub mod doctor;
pub(crate) mod tool;

pub use adapter::*;
pub use displays::*;
pub use doctor::*;
pub use tool::DEFAULT_TOOL_TIMEOUT;

//! Core services for the xsnap engine

pub mod classifier;
pub mod coordinator;
pub mod synthesizer;
pub mod transitions;

pub use classifier::*;
pub use coordinator::*;
pub use synthesizer::*;
pub use transitions::*;

//! Configuration management for xsnap

pub mod settings;
pub mod store;

pub use settings::{MarginConfig, Settings};
pub use store::SettingsStore;

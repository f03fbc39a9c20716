//! Data models for the xsnap decision engine

pub mod geometry;
pub mod tiling;

pub use geometry::*;
pub use tiling::*;

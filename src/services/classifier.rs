//! Geometry classification.
//!
//! A window is in a tiling state when every edge of its rectangle lies within
//! the pixel tolerance of the tile that state occupies, where the tiles are
//! cut with the active margin configuration. The tolerance absorbs
//! window-manager rounding and decoration jitter; classifying with the same
//! margins used for synthesis makes classify(synthesize(s)) return s for any
//! margin configuration.

use crate::config::MarginConfig;
use crate::models::{Rect, TilingState};
use crate::services::synthesizer::synthesize;

/// Match order; first hit wins. Maximized is checked before the quadrants and
/// quadrants before halves so that overlapping matches on tiny work areas
/// resolve toward the larger tile.
const CANDIDATES: [TilingState; 9] = [
    TilingState::Maximized,
    TilingState::TopLeftQuadrant,
    TilingState::TopRightQuadrant,
    TilingState::BottomLeftQuadrant,
    TilingState::BottomRightQuadrant,
    TilingState::LeftHalf,
    TilingState::RightHalf,
    TilingState::TopHalf,
    TilingState::BottomHalf,
];

fn edges_within(a: Rect, b: Rect, tolerance_px: u32) -> bool {
    let tolerance = tolerance_px as i32;
    (a.x - b.x).abs() <= tolerance
        && (a.y - b.y).abs() <= tolerance
        && (a.right() - b.right()).abs() <= tolerance
        && (a.bottom() - b.bottom()).abs() <= tolerance
}

/// Derives the tiling state of a window from its live rectangle.
///
/// Pure and total: any rectangle that matches no snap tile, and any window on
/// a degenerate work area, classifies as `FloatingOther`.
pub fn classify(
    window: Rect,
    work_area: Rect,
    margins: MarginConfig,
    tolerance_px: u32,
) -> TilingState {
    if work_area.is_degenerate() {
        return TilingState::FloatingOther;
    }

    for candidate in CANDIDATES {
        let expected = synthesize(candidate, work_area, margins);
        if edges_within(window, expected, tolerance_px) {
            return candidate;
        }
    }

    TilingState::FloatingOther
}

//! Target-state geometry synthesis.
//!
//! Tiles are cut from the work area with two insets: `outer` pixels between
//! every tile and the work-area boundary, and a `gap`-wide seam between two
//! adjacent tiles. The seam is centered on the 50% split line, with the odd
//! pixel of an odd gap going to the trailing tile.

use crate::config::MarginConfig;
use crate::models::{Rect, TilingState};

/// Per-axis cut positions for full, leading-half, and trailing-half tiles
struct AxisSplit {
    full_start: i32,
    full_len: i32,
    lead_len: i32,
    trail_start: i32,
    trail_len: i32,
}

fn split_axis(origin: i32, extent: u32, outer: u32, gap: u32) -> AxisSplit {
    let outer = outer as i32;
    let gap = gap as i32;

    let start = origin + outer;
    let end = origin + extent as i32 - outer;
    let mid = origin + (extent / 2) as i32;

    AxisSplit {
        full_start: start,
        full_len: end - start,
        lead_len: (mid - gap / 2) - start,
        trail_start: mid + (gap - gap / 2),
        trail_len: end - (mid + (gap - gap / 2)),
    }
}

/// Clamps to 1x1 rather than failing on degenerate work areas or oversized
/// margins.
fn tile(x: i32, y: i32, width: i32, height: i32) -> Rect {
    Rect::new(x, y, width.max(1) as u32, height.max(1) as u32)
}

/// Concrete rectangle for a target state within the work area.
///
/// Total over all states; `FloatingOther` has no tile of its own and yields
/// the maximized frame.
pub fn synthesize(target: TilingState, work_area: Rect, margins: MarginConfig) -> Rect {
    let h = split_axis(work_area.x, work_area.width, margins.outer, margins.gap);
    let v = split_axis(work_area.y, work_area.height, margins.outer, margins.gap);

    match target {
        TilingState::Maximized | TilingState::FloatingOther => {
            tile(h.full_start, v.full_start, h.full_len, v.full_len)
        }
        TilingState::LeftHalf => tile(h.full_start, v.full_start, h.lead_len, v.full_len),
        TilingState::RightHalf => tile(h.trail_start, v.full_start, h.trail_len, v.full_len),
        TilingState::TopHalf => tile(h.full_start, v.full_start, h.full_len, v.lead_len),
        TilingState::BottomHalf => tile(h.full_start, v.trail_start, h.full_len, v.trail_len),
        TilingState::TopLeftQuadrant => tile(h.full_start, v.full_start, h.lead_len, v.lead_len),
        TilingState::TopRightQuadrant => tile(h.trail_start, v.full_start, h.trail_len, v.lead_len),
        TilingState::BottomLeftQuadrant => {
            tile(h.full_start, v.trail_start, h.lead_len, v.trail_len)
        }
        TilingState::BottomRightQuadrant => {
            tile(h.trail_start, v.trail_start, h.trail_len, v.trail_len)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wa() -> Rect {
        Rect::new(0, 0, 1920, 1080)
    }

    fn no_margins() -> MarginConfig {
        MarginConfig { outer: 0, gap: 0 }
    }

    #[test]
    fn halves_split_the_work_area_exactly() {
        assert_eq!(
            synthesize(TilingState::LeftHalf, wa(), no_margins()),
            Rect::new(0, 0, 960, 1080)
        );
        assert_eq!(
            synthesize(TilingState::RightHalf, wa(), no_margins()),
            Rect::new(960, 0, 960, 1080)
        );
        assert_eq!(
            synthesize(TilingState::TopHalf, wa(), no_margins()),
            Rect::new(0, 0, 1920, 540)
        );
        assert_eq!(
            synthesize(TilingState::BottomHalf, wa(), no_margins()),
            Rect::new(0, 540, 1920, 540)
        );
    }

    #[test]
    fn quadrants_combine_both_axes() {
        assert_eq!(
            synthesize(TilingState::TopLeftQuadrant, wa(), no_margins()),
            Rect::new(0, 0, 960, 540)
        );
        assert_eq!(
            synthesize(TilingState::BottomRightQuadrant, wa(), no_margins()),
            Rect::new(960, 540, 960, 540)
        );
    }

    #[test]
    fn maximized_is_inset_by_the_outer_margin() {
        let margins = MarginConfig { outer: 10, gap: 8 };
        assert_eq!(
            synthesize(TilingState::Maximized, wa(), margins),
            Rect::new(10, 10, 1900, 1060)
        );
    }

    #[test]
    fn margins_inset_outer_edges_and_split_the_gap() {
        let margins = MarginConfig { outer: 10, gap: 8 };
        assert_eq!(
            synthesize(TilingState::LeftHalf, wa(), margins),
            Rect::new(10, 10, 946, 1060)
        );
        assert_eq!(
            synthesize(TilingState::RightHalf, wa(), margins),
            Rect::new(964, 10, 946, 1060)
        );
    }

    #[test]
    fn adjacent_tiles_leave_a_gap_wide_seam() {
        for gap in [0u32, 1, 7, 8] {
            let margins = MarginConfig { outer: 0, gap };
            let left = synthesize(TilingState::LeftHalf, wa(), margins);
            let right = synthesize(TilingState::RightHalf, wa(), margins);
            assert_eq!(right.x - left.right(), gap as i32, "gap {gap}");

            let top = synthesize(TilingState::TopHalf, wa(), margins);
            let bottom = synthesize(TilingState::BottomHalf, wa(), margins);
            assert_eq!(bottom.y - top.bottom(), gap as i32, "gap {gap}");
        }
    }

    #[test]
    fn work_area_offset_shifts_every_tile() {
        let offset_wa = Rect::new(1920, 200, 2560, 1440);
        let rect = synthesize(TilingState::TopRightQuadrant, offset_wa, no_margins());
        assert_eq!(rect, Rect::new(1920 + 1280, 200, 1280, 720));
    }

    #[test]
    fn floating_other_falls_back_to_the_maximized_frame() {
        let margins = MarginConfig { outer: 10, gap: 8 };
        assert_eq!(
            synthesize(TilingState::FloatingOther, wa(), margins),
            synthesize(TilingState::Maximized, wa(), margins)
        );
    }

    #[test]
    fn degenerate_work_areas_clamp_instead_of_failing() {
        let tiny = Rect::new(0, 0, 0, 0);
        let rect = synthesize(TilingState::LeftHalf, tiny, no_margins());
        assert_eq!(rect.width, 1);
        assert_eq!(rect.height, 1);

        let oversized = MarginConfig {
            outer: 2000,
            gap: 0,
        };
        let rect = synthesize(TilingState::Maximized, wa(), oversized);
        assert_eq!(rect.width, 1);
        assert_eq!(rect.height, 1);
    }
}

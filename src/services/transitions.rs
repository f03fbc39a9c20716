//! The transition table behind two-step snapping.
//!
//! From a full-size window every direction reaches the matching half; from a
//! half the perpendicular directions refine into the adjacent corner. A
//! direction that reinforces the current position is a no-op, a direction
//! toward the opposite side flips across the shared seam. Quadrants step back
//! out through the half on the side they are pushed toward, so no transition
//! ever crosses the screen diagonally.

use crate::models::{Direction, TilingState};

/// Next tiling state for a directional command.
///
/// Total over the full state x direction space with no fallthrough; every
/// result is a snap target, never `FloatingOther`.
pub fn transition(current: TilingState, direction: Direction) -> TilingState {
    use Direction::*;
    use TilingState::*;

    match (current, direction) {
        (Maximized | FloatingOther, Left) => LeftHalf,
        (Maximized | FloatingOther, Right) => RightHalf,
        (Maximized | FloatingOther, Up) => TopHalf,
        (Maximized | FloatingOther, Down) => BottomHalf,

        (LeftHalf, Left) => LeftHalf,
        (LeftHalf, Right) => RightHalf,
        (LeftHalf, Up) => TopLeftQuadrant,
        (LeftHalf, Down) => BottomLeftQuadrant,

        (RightHalf, Left) => LeftHalf,
        (RightHalf, Right) => RightHalf,
        (RightHalf, Up) => TopRightQuadrant,
        (RightHalf, Down) => BottomRightQuadrant,

        (TopHalf, Left) => TopLeftQuadrant,
        (TopHalf, Right) => TopRightQuadrant,
        (TopHalf, Up) => TopHalf,
        (TopHalf, Down) => BottomHalf,

        (BottomHalf, Left) => BottomLeftQuadrant,
        (BottomHalf, Right) => BottomRightQuadrant,
        (BottomHalf, Up) => TopHalf,
        (BottomHalf, Down) => BottomHalf,

        (TopLeftQuadrant, Left) => TopLeftQuadrant,
        (TopLeftQuadrant, Right) => RightHalf,
        (TopLeftQuadrant, Up) => TopLeftQuadrant,
        (TopLeftQuadrant, Down) => BottomHalf,

        (TopRightQuadrant, Left) => LeftHalf,
        (TopRightQuadrant, Right) => TopRightQuadrant,
        (TopRightQuadrant, Up) => TopRightQuadrant,
        (TopRightQuadrant, Down) => BottomHalf,

        (BottomLeftQuadrant, Left) => BottomLeftQuadrant,
        (BottomLeftQuadrant, Right) => RightHalf,
        (BottomLeftQuadrant, Up) => TopHalf,
        (BottomLeftQuadrant, Down) => BottomLeftQuadrant,

        (BottomRightQuadrant, Left) => LeftHalf,
        (BottomRightQuadrant, Right) => BottomRightQuadrant,
        (BottomRightQuadrant, Up) => TopHalf,
        (BottomRightQuadrant, Down) => BottomRightQuadrant,
    }
}

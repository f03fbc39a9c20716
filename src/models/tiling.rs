use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete tiling position of a window relative to its work area.
///
/// Always derived from live geometry, never stored, so the value stays
/// consistent with reality even when another program moved the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TilingState {
    Maximized,
    LeftHalf,
    RightHalf,
    TopHalf,
    BottomHalf,
    TopLeftQuadrant,
    TopRightQuadrant,
    BottomLeftQuadrant,
    BottomRightQuadrant,
    /// Any geometry that matches no snap position
    FloatingOther,
}

impl TilingState {
    /// The nine states a window can be snapped into
    pub const SNAP_TARGETS: [TilingState; 9] = [
        TilingState::Maximized,
        TilingState::LeftHalf,
        TilingState::RightHalf,
        TilingState::TopHalf,
        TilingState::BottomHalf,
        TilingState::TopLeftQuadrant,
        TilingState::TopRightQuadrant,
        TilingState::BottomLeftQuadrant,
        TilingState::BottomRightQuadrant,
    ];

    pub const ALL: [TilingState; 10] = [
        TilingState::Maximized,
        TilingState::LeftHalf,
        TilingState::RightHalf,
        TilingState::TopHalf,
        TilingState::BottomHalf,
        TilingState::TopLeftQuadrant,
        TilingState::TopRightQuadrant,
        TilingState::BottomLeftQuadrant,
        TilingState::BottomRightQuadrant,
        TilingState::FloatingOther,
    ];

    /// Stable machine-readable name, matching the serde representation
    pub fn name(&self) -> &'static str {
        match self {
            TilingState::Maximized => "maximized",
            TilingState::LeftHalf => "left-half",
            TilingState::RightHalf => "right-half",
            TilingState::TopHalf => "top-half",
            TilingState::BottomHalf => "bottom-half",
            TilingState::TopLeftQuadrant => "top-left-quadrant",
            TilingState::TopRightQuadrant => "top-right-quadrant",
            TilingState::BottomLeftQuadrant => "bottom-left-quadrant",
            TilingState::BottomRightQuadrant => "bottom-right-quadrant",
            TilingState::FloatingOther => "floating-other",
        }
    }

    /// Human readable label for menus and notifications
    pub fn title(&self) -> &'static str {
        match self {
            TilingState::Maximized => "Maximized",
            TilingState::LeftHalf => "Left Half",
            TilingState::RightHalf => "Right Half",
            TilingState::TopHalf => "Top Half",
            TilingState::BottomHalf => "Bottom Half",
            TilingState::TopLeftQuadrant => "Top Left",
            TilingState::TopRightQuadrant => "Top Right",
            TilingState::BottomLeftQuadrant => "Bottom Left",
            TilingState::BottomRightQuadrant => "Bottom Right",
            TilingState::FloatingOther => "Floating",
        }
    }
}

impl fmt::Display for TilingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TilingState {
    type Err = String;

    /// Parses the layouts a user can request by name. `FloatingOther` is a
    /// classification result, not a target, so it is not accepted here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "maximized" | "max" => Ok(TilingState::Maximized),
            "left-half" | "left" => Ok(TilingState::LeftHalf),
            "right-half" | "right" => Ok(TilingState::RightHalf),
            "top-half" | "top" => Ok(TilingState::TopHalf),
            "bottom-half" | "bottom" => Ok(TilingState::BottomHalf),
            "top-left-quadrant" | "top-left" => Ok(TilingState::TopLeftQuadrant),
            "top-right-quadrant" | "top-right" => Ok(TilingState::TopRightQuadrant),
            "bottom-left-quadrant" | "bottom-left" => Ok(TilingState::BottomLeftQuadrant),
            "bottom-right-quadrant" | "bottom-right" => Ok(TilingState::BottomRightQuadrant),
            _ => Err(format!(
                "Unknown layout: {s} (expected one of maximized, left-half, right-half, \
                 top-half, bottom-half, top-left, top-right, bottom-left, bottom-right)"
            )),
        }
    }
}

/// Semantic payload of a snap command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            _ => Err(format!(
                "Unknown direction: {s} (expected left, right, up, or down)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_names_round_trip_through_parsing() {
        for state in TilingState::SNAP_TARGETS {
            assert_eq!(state.name().parse::<TilingState>().unwrap(), state);
        }
    }

    #[test]
    fn short_layout_aliases_are_accepted() {
        assert_eq!("left".parse::<TilingState>().unwrap(), TilingState::LeftHalf);
        assert_eq!(
            "TOP-RIGHT".parse::<TilingState>().unwrap(),
            TilingState::TopRightQuadrant
        );
    }

    #[test]
    fn floating_is_not_a_requestable_layout() {
        assert!("floating-other".parse::<TilingState>().is_err());
    }

    #[test]
    fn direction_parsing_is_case_insensitive() {
        assert_eq!("Left".parse::<Direction>().unwrap(), Direction::Left);
        assert_eq!("DOWN".parse::<Direction>().unwrap(), Direction::Down);
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn serde_names_match_display_names() {
        for state in TilingState::ALL {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{}\"", state.name()));
        }
        for direction in Direction::ALL {
            let json = serde_json::to_string(&direction).unwrap();
            assert_eq!(json, format!("\"{}\"", direction.name()));
        }
    }
}

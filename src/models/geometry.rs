use serde::{Deserialize, Serialize};

/// Window or work-area bounds in screen pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// True when either dimension collapsed to zero
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Half-open containment test used for display lookup
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_follow_origin_and_extent() {
        let rect = Rect::new(100, 50, 800, 600);
        assert_eq!(rect.right(), 900);
        assert_eq!(rect.bottom(), 650);
    }

    #[test]
    fn containment_is_half_open() {
        let rect = Rect::new(0, 0, 1920, 1080);
        assert!(rect.contains_point(0, 0));
        assert!(rect.contains_point(1919, 1079));
        assert!(!rect.contains_point(1920, 0));
        assert!(!rect.contains_point(0, 1080));
    }

    #[test]
    fn degenerate_rects_are_flagged() {
        assert!(Rect::new(0, 0, 0, 1080).is_degenerate());
        assert!(Rect::new(0, 0, 1920, 0).is_degenerate());
        assert!(!Rect::new(0, 0, 1, 1).is_degenerate());
    }

    #[test]
    fn display_uses_xrandr_geometry_form() {
        let rect = Rect::new(1920, 0, 2560, 1440);
        assert_eq!(rect.to_string(), "2560x1440+1920+0");
    }
}

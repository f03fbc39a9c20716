//! Display enumeration through xrandr.
//!
//! The work area for a window is the frame of the display containing its
//! origin. Panels and docks are not subtracted; the configured outer margin
//! is the user's clearance for those.

use crate::models::Rect;
use crate::x11::tool::{run_tool_checked, DEFAULT_TOOL_TIMEOUT};
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

use crate::Result;

/// One connected output as reported by xrandr
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayInfo {
    pub name: String,
    pub frame: Rect,
    pub primary: bool,
}

/// Source of the connected display set
#[async_trait]
pub trait DisplayLayout: Send + Sync {
    async fn displays(&self) -> Result<Vec<DisplayInfo>>;
}

/// xrandr-backed display source
pub struct XrandrDisplays {
    timeout: Duration,
}

impl XrandrDisplays {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for XrandrDisplays {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DisplayLayout for XrandrDisplays {
    async fn displays(&self) -> Result<Vec<DisplayInfo>> {
        let output = run_tool_checked("xrandr", &[], self.timeout).await?;
        Ok(parse_xrandr(&output))
    }
}

/// Fixed display set for tests
#[derive(Debug, Default)]
pub struct InMemoryDisplays {
    displays: Vec<DisplayInfo>,
}

impl InMemoryDisplays {
    pub fn new_with(displays: Vec<DisplayInfo>) -> Self {
        Self { displays }
    }

    /// A single primary 1920x1080 display at the origin
    pub fn single_1080p() -> Self {
        Self::new_with(vec![DisplayInfo {
            name: "eDP-1".to_string(),
            frame: Rect::new(0, 0, 1920, 1080),
            primary: true,
        }])
    }
}

#[async_trait]
impl DisplayLayout for InMemoryDisplays {
    async fn displays(&self) -> Result<Vec<DisplayInfo>> {
        Ok(self.displays.clone())
    }
}

fn connected_line() -> &'static Regex {
    static CONNECTED_LINE: OnceLock<Regex> = OnceLock::new();
    CONNECTED_LINE.get_or_init(|| {
        Regex::new(r" connected(?: primary)? (\d+)x(\d+)\+(\d+)\+(\d+)").expect("static pattern")
    })
}

/// Extracts connected output geometries from full xrandr output. Disconnected
/// outputs and connected outputs with no active mode carry no geometry and
/// are skipped.
pub fn parse_xrandr(output: &str) -> Vec<DisplayInfo> {
    let pattern = connected_line();
    let mut displays = Vec::new();

    for line in output.lines() {
        let Some(captures) = pattern.captures(line) else {
            continue;
        };

        let parse = |index: usize| captures[index].parse::<u32>().ok();
        let (Some(width), Some(height), Some(x), Some(y)) =
            (parse(1), parse(2), parse(3), parse(4))
        else {
            continue;
        };

        let name = line.split_whitespace().next().unwrap_or("").to_string();
        displays.push(DisplayInfo {
            name,
            frame: Rect::new(x as i32, y as i32, width, height),
            primary: line.contains(" connected primary "),
        });
    }

    displays
}

/// Work area for a point: the display containing it, the primary display when
/// no display contains it, or the first display as a last resort.
pub fn pick_work_area(displays: &[DisplayInfo], x: i32, y: i32) -> Option<Rect> {
    displays
        .iter()
        .find(|display| display.frame.contains_point(x, y))
        .or_else(|| displays.iter().find(|display| display.primary))
        .or_else(|| displays.first())
        .map(|display| display.frame)
}

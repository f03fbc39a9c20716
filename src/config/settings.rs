use serde::{Deserialize, Serialize};

/// Pixel insets applied when cutting tiles from the work area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginConfig {
    /// Inset between tiles and the work-area boundary
    pub outer: u32,
    /// Seam between two adjacent tiles
    pub gap: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self { outer: 0, gap: 0 }
    }
}

/// User-editable settings, persisted as JSON.
///
/// Unknown keys are ignored and missing keys fall back to their defaults, so
/// files written by older or newer versions keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub margins: MarginConfig,
    /// Pixel slack for matching a window to a tile
    pub tolerance_px: u32,
    /// Desktop notification on every applied snap
    pub notify_on_apply: bool,
    /// Desktop notification when the daemon starts
    pub notify_on_launch: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            margins: MarginConfig::default(),
            tolerance_px: 8,
            notify_on_apply: false,
            notify_on_launch: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_zero_margins_with_tolerance() {
        let settings = Settings::default();
        assert_eq!(settings.margins, MarginConfig { outer: 0, gap: 0 });
        assert_eq!(settings.tolerance_px, 8);
        assert!(!settings.notify_on_apply);
        assert!(settings.notify_on_launch);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"margins":{"outer":12}}"#).unwrap();
        assert_eq!(settings.margins.outer, 12);
        assert_eq!(settings.margins.gap, 0);
        assert_eq!(settings.tolerance_px, 8);
        assert!(settings.notify_on_launch);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let settings: Settings =
            serde_json::from_str(r#"{"tolerance_px":4,"theme":"dark"}"#).unwrap();
        assert_eq!(settings.tolerance_px, 4);
    }

    #[test]
    fn settings_round_trip_through_json() {
        let settings = Settings {
            margins: MarginConfig { outer: 10, gap: 8 },
            tolerance_px: 6,
            notify_on_apply: true,
            notify_on_launch: false,
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}

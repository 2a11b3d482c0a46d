//! Data models for the seat-map viewer.
//! Buttons are the selectable zones painted over the floor plan; the config
//! is fixed at construction and never changes for the life of a viewer.

use serde::{Deserialize, Serialize};

/// A rounded-rectangle zone drawn over the floor plan.
/// Created once at startup, read every frame, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Corner radius; 0 gives square corners.
    #[serde(default)]
    pub r: f64,
    /// CSS fill color. `None` falls back to the default gray.
    #[serde(default)]
    pub style: Option<String>,
}

impl Button {
    pub fn fill_style(&self) -> &str {
        self.style.as_deref().unwrap_or("#aaa")
    }
}

/// Construction-time configuration for a viewer instance.
/// There is no runtime reconfiguration; resizing the window builds a new
/// viewer from a new config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub width: f64,
    pub height: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub zoom_intensity: f64,
    pub image_url: String,
    pub buttons: Vec<Button>,
}

impl ViewerConfig {
    /// Default viewer at the given canvas size: 0.5x..2.0x zoom range,
    /// intensity 0.2 per wheel step, zones from the embedded layout.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            min_scale: 0.5,
            max_scale: 2.0,
            zoom_intensity: 0.2,
            image_url: "assets/floorplan.png".to_string(),
            buttons: parse_layout(DEFAULT_LAYOUT),
        }
    }
}

/// Zone layout shipped alongside the floor-plan asset.
pub const DEFAULT_LAYOUT: &str = r##"[
    { "x": 89,  "y": 234, "w": 58, "h": 58, "r": 8, "style": "#ab8" },
    { "x": 149, "y": 234, "w": 61, "h": 58, "r": 8, "style": "#ab0" },
    { "x": 213, "y": 234, "w": 57, "h": 58, "r": 8, "style": "#abf" }
]"##;

/// Parse a zone layout document. A malformed document yields an empty
/// layout with a logged warning rather than a dead viewer.
pub fn parse_layout(raw: &str) -> Vec<Button> {
    match serde_json::from_str::<Vec<Button>>(raw) {
        Ok(buttons) => buttons,
        Err(e) => {
            log::warn!("zone layout unreadable, showing none: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_parses() {
        let buttons = parse_layout(DEFAULT_LAYOUT);
        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0].x, 89.0);
        assert_eq!(buttons[0].r, 8.0);
        assert_eq!(buttons[1].fill_style(), "#ab0");
    }

    #[test]
    fn layout_fields_default_when_absent() {
        let buttons = parse_layout(r#"[{ "x": 1, "y": 2, "w": 3, "h": 4 }]"#);
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].r, 0.0);
        assert_eq!(buttons[0].fill_style(), "#aaa");
    }

    #[test]
    fn malformed_layout_falls_back_to_empty() {
        assert!(parse_layout("not json").is_empty());
        assert!(parse_layout(r#"{ "x": 1 }"#).is_empty());
    }

    #[test]
    fn config_defaults() {
        let cfg = ViewerConfig::with_size(500.0, 500.0);
        assert_eq!(cfg.min_scale, 0.5);
        assert_eq!(cfg.max_scale, 2.0);
        assert_eq!(cfg.buttons.len(), 3);
    }
}

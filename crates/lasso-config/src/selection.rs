use serde::{Deserialize, Serialize};

/// How far (in screen px) a word rect may sit from the stroke polyline and
/// still count as hit. Compensates for imprecise freehand input.
pub const DEFAULT_BRUSH_TOLERANCE_PX: f32 = 15.0;

/// Gestures whose total path length stays under this are treated as taps.
pub const DEFAULT_TAP_SLOP_PX: f32 = 6.0;

fn default_brush_tolerance() -> f32 {
    DEFAULT_BRUSH_TOLERANCE_PX
}

fn default_tap_slop() -> f32 {
    DEFAULT_TAP_SLOP_PX
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SelectionConfig {
    #[serde(default = "default_brush_tolerance")]
    pub brush_tolerance_px: f32,
    #[serde(default = "default_tap_slop")]
    pub tap_slop_px: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            brush_tolerance_px: default_brush_tolerance(),
            tap_slop_px: default_tap_slop(),
        }
    }
}

use serde::{Deserialize, Serialize};

fn default_display_index() -> usize {
    0
}

fn default_include_cursor() -> bool {
    false
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CaptureConfig {
    /// Which display to capture; falls back to the first one if out of range.
    #[serde(default = "default_display_index")]
    pub display_index: usize,
    #[serde(default = "default_include_cursor")]
    pub include_cursor: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            display_index: default_display_index(),
            include_cursor: default_include_cursor(),
        }
    }
}

use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_accurate_pass() -> bool {
    true
}

fn default_min_confidence() -> f32 {
    0.3
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Run the slower accurate pass after the fast one.
    #[serde(default = "default_accurate_pass")]
    pub accurate_pass: bool,
    /// Observations below this confidence are dropped from snapshots.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            accurate_pass: default_accurate_pass(),
            min_confidence: default_min_confidence(),
            language: default_language(),
        }
    }
}

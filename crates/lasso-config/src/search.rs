use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_upload_url() -> String {
    "https://images.google.com/searchbyimage/upload".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Endpoint that answers an image upload with a redirect to a results page.
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            upload_url: default_upload_url(),
        }
    }
}

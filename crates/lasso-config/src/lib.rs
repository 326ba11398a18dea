use std::env;

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::ocr::OcrConfig;
use self::search::SearchConfig;
use self::selection::SelectionConfig;

pub mod capture;
pub mod ocr;
pub mod search;
pub mod selection;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub ocr: OcrConfig,
    pub selection: SelectionConfig,
    pub search: SearchConfig,
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config::default();

        if let Ok(url) = env::var("LASSO_SEARCH_URL") {
            config.search.upload_url = url;
        }

        if let Ok(v) = env::var("LASSO_BRUSH_TOLERANCE_PX")
            && let Ok(px) = v.parse()
        {
            config.selection.brush_tolerance_px = px;
        }

        if let Ok(v) = env::var("LASSO_OCR_MIN_CONFIDENCE")
            && let Ok(c) = v.parse()
        {
            config.ocr.min_confidence = c;
        }

        if let Ok(v) = env::var("LASSO_DISPLAY_INDEX")
            && let Ok(index) = v.parse()
        {
            config.capture.display_index = index;
        }

        config
    }
}

mod client;
mod crop;

pub use client::ReverseImageClient;
pub use crop::crop_to_png;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("search endpoint answered {0} instead of a redirect")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("redirect response is missing a usable location header")]
    MissingRedirect,

    #[error("crop region lies outside the captured frame")]
    CropFailed,

    #[error("failed to encode the crop: {0}")]
    EncodeFailed(String),
}

use lasso_config::search::SearchConfig;
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;

use crate::SearchError;

const UPLOAD_MIME: &str = "image/png";

/// Uploads a cropped frame and resolves the redirect the search provider
/// answers with. Redirects are not followed; the Location header itself is
/// the result.
#[derive(Clone)]
pub struct ReverseImageClient {
    http: reqwest::Client,
    upload_url: String,
}

impl ReverseImageClient {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;
        Ok(Self {
            http,
            upload_url: config.upload_url.clone(),
        })
    }

    /// One round trip, no retries. Any non-redirect answer is a failed search.
    pub async fn search(&self, png: Vec<u8>) -> Result<String, SearchError> {
        tracing::debug!(
            bytes = png.len(),
            url = %self.upload_url,
            "uploading crop for reverse image search"
        );

        let response = self
            .http
            .post(&self.upload_url)
            .header(CONTENT_TYPE, UPLOAD_MIME)
            .body(png)
            .send()
            .await?;

        let status = response.status();
        if !status.is_redirection() {
            return Err(SearchError::UnexpectedStatus(status));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .ok_or(SearchError::MissingRedirect)?;
        let url = location
            .to_str()
            .map_err(|_| SearchError::MissingRedirect)?;

        tracing::debug!(result = url, "reverse image search resolved");
        Ok(url.to_string())
    }
}

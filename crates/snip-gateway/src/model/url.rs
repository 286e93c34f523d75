use serde::{Deserialize, Serialize};
use snip_core::UrlRecord;

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUrlRequest {
    /// The URL to shorten. Missing and `null` are rejected as invalid.
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UrlResponse {
    pub shortened: String,
    pub original: String,
}

impl From<UrlRecord> for UrlResponse {
    fn from(record: UrlRecord) -> Self {
        Self {
            shortened: record.short_code.to_string(),
            original: record.original_url,
        }
    }
}

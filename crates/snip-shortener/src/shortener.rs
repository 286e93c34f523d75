use crate::error::Result;
use async_trait::async_trait;
use snip_core::{ShortCode, UrlRecord};

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens `original_url` and returns the stored record.
    ///
    /// A missing URL is passed as the empty string.
    async fn create_url(&self, original_url: &str) -> Result<UrlRecord>;

    /// Resolves a short code to its stored URL record.
    /// Returns `None` if the code does not exist.
    async fn get_url(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;
}

use crate::error::CacheError;
use crate::repository::UrlRecord;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, CacheError>;

/// Short-lived copies of [`UrlRecord`]s keyed by [`ShortCode`].
///
/// A miss says nothing about whether the code is stored.
#[async_trait]
pub trait UrlCache: Send + Sync + 'static {
    /// `Ok(None)` on a miss or an expired entry.
    async fn get_url(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    /// Replaces any entry for the record's code and restarts its expiration.
    async fn set_url(&self, record: &UrlRecord) -> Result<()>;
}

use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, StorageError>;

/// A shortened URL: the short code paired with the URL it stands in for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub short_code: ShortCode,
    /// Stored verbatim, no normalization.
    pub original_url: String,
}

impl UrlRecord {
    pub fn new(short_code: ShortCode, original_url: impl Into<String>) -> Self {
        Self {
            short_code,
            original_url: original_url.into(),
        }
    }
}

/// Lookups against the durable store of short code mappings.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// `Ok(None)` when nothing is stored under `code`.
    async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>>;

    async fn exists(&self, code: &ShortCode) -> Result<bool>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Stores a new mapping. Mappings are never overwritten: a taken `code`
    /// yields [`StorageError::Conflict`] and leaves the stored URL untouched.
    async fn insert(&self, code: &ShortCode, original_url: &str) -> Result<UrlRecord>;
}

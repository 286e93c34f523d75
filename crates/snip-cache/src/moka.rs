use async_trait::async_trait;
use moka::future::Cache;
use snip_core::{CacheError, ShortCode, UrlCache, UrlRecord};
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

pub type Result<T> = std::result::Result<T, CacheError>;

/// How long a cached record stays valid after it was last stored.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default upper bound on the number of cached records.
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Process-local read-through cache of URL records.
///
/// Entries expire [`DEFAULT_TTL`] after they were last stored. Storing a code
/// again replaces the record and restarts its expiration. Capacity is bounded;
/// eviction never keeps an entry past its TTL.
#[derive(Debug, Clone)]
pub struct MokaUrlCache {
    cache: Cache<String, UrlRecord>,
}

impl MokaUrlCache {
    /// Creates a cache with [`DEFAULT_MAX_CAPACITY`] and [`DEFAULT_TTL`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY)
    }

    /// Creates a cache with a custom maximum capacity and [`DEFAULT_TTL`].
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self::with_ttl(max_capacity, DEFAULT_TTL)
    }

    /// Creates a cache with custom capacity and time-to-live.
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    /// Shorthand for [`CacheConfig::builder`].
    pub fn builder() -> CacheConfigBuilder {
        CacheConfig::builder()
    }
}

impl Default for MokaUrlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for MokaUrlCache {
    async fn get_url(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        trace!(code = %code, "Probing cache");

        match self.cache.get(code.as_str()).await {
            Some(record) => {
                debug!(code = %code, "Cache hit");
                Ok(Some(record))
            }
            None => {
                trace!(code = %code, "Cache miss");
                Ok(None)
            }
        }
    }

    async fn set_url(&self, record: &UrlRecord) -> Result<()> {
        let code = &record.short_code;
        trace!(code = %code, "Caching record");

        self.cache
            .insert(code.as_str().to_string(), record.clone())
            .await;
        Ok(())
    }
}

/// Sizing and expiry for a [`MokaUrlCache`].
#[derive(Debug, TypedBuilder)]
pub struct CacheConfig {
    #[builder(default = DEFAULT_MAX_CAPACITY)]
    max_capacity: u64,
    /// Measured from the last store of an entry.
    #[builder(default = DEFAULT_TTL)]
    ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl From<CacheConfig> for MokaUrlCache {
    fn from(config: CacheConfig) -> Self {
        MokaUrlCache::with_ttl(config.max_capacity, config.ttl)
    }
}

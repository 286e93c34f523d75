use crate::error::{Result, ShortenerError};
use crate::shortener::Shortener;
use async_trait::async_trait;
use snip_core::{Repository, ShortCode, StorageError, UrlCache, UrlRecord};
use snip_generator::CodeGenerator;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// How many alternative candidates are tried after the first one is taken.
pub const MAX_REGENERATIONS: usize = 10;

/// A concrete implementation of the `Shortener` trait.
///
/// This service composes a durable `Repository`, a `UrlCache` in front of it
/// and a `CodeGenerator`:
/// - lookups read the cache first and only fall back to the repository on a
///   miss, backfilling the cache with what they find
/// - creation derives a candidate code from the URL, checks it against the
///   cache and then the repository, and regenerates up to
///   [`MAX_REGENERATIONS`] times while the candidate is taken
///
/// A cache hit counts as proof that a candidate is taken, so the repository is
/// not asked about that candidate. A `Conflict` from the repository on insert
/// (a concurrent request won the same code) is handled like any other
/// collision.
pub struct ShortenerService<R, C, G> {
    repository: Arc<R>,
    cache: Arc<C>,
    generator: Arc<G>,
}

impl<R, C, G> Clone for ShortenerService<R, C, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<R: Repository, C: UrlCache, G: CodeGenerator> ShortenerService<R, C, G> {
    pub fn new(repository: R, cache: C, generator: G) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: Arc::new(cache),
            generator: Arc::new(generator),
        }
    }

    /// Returns a reference to the repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns a reference to the cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Returns a reference to the generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    fn validate_url(url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    async fn is_taken(&self, code: &ShortCode) -> Result<bool> {
        if self.cache.get_url(code).await?.is_some() {
            debug!(code = %code, "Candidate taken according to cache");
            return Ok(true);
        }

        let taken = self.repository.exists(code).await?;
        if taken {
            debug!(code = %code, "Candidate taken according to repository");
        }
        Ok(taken)
    }

    /// Returns `None` when another writer stored the code first.
    async fn try_insert(&self, code: &ShortCode, url: &str) -> Result<Option<UrlRecord>> {
        match self.repository.insert(code, url).await {
            Ok(record) => Ok(Some(record)),
            Err(StorageError::Conflict(_)) => {
                warn!(code = %code, "Candidate was stored concurrently, regenerating");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl<R: Repository, C: UrlCache, G: CodeGenerator> Shortener for ShortenerService<R, C, G> {
    async fn create_url(&self, original_url: &str) -> Result<UrlRecord> {
        Self::validate_url(original_url)?;

        let (mut candidate, seed) = self.generator.generate(original_url);
        let mut regenerations = 0;

        loop {
            if !self.is_taken(&candidate).await? {
                if let Some(record) = self.try_insert(&candidate, original_url).await? {
                    self.cache.set_url(&record).await?;
                    info!(code = %record.short_code, regenerations, "Shortened URL");
                    return Ok(record);
                }
            }

            if regenerations == MAX_REGENERATIONS {
                warn!(url = %original_url, "Exhausted short code regenerations");
                return Err(ShortenerError::Exhausted {
                    url: original_url.to_string(),
                    attempts: MAX_REGENERATIONS,
                });
            }

            regenerations += 1;
            candidate = self.generator.regenerate(&seed);
            trace!(code = %candidate, regenerations, "Regenerated candidate");
        }
    }

    async fn get_url(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        trace!(code = %code, "resolving short code");

        if let Some(record) = self.cache.get_url(code).await? {
            return Ok(Some(record));
        }

        match self.repository.get(code).await? {
            Some(record) => {
                debug!(code = %code, "Resolved from repository, backfilling cache");
                self.cache.set_url(&record).await?;
                Ok(Some(record))
            }
            None => {
                trace!(code = %code, "Short code not found");
                Ok(None)
            }
        }
    }
}

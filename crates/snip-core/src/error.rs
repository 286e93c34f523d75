use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Rejected input at the type level.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Failures reported by a [`UrlCache`](crate::UrlCache) backend.
///
/// A cache miss is not an error, it is `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache is unreachable: {0}")]
    Unavailable(String),
    #[error("cache did not answer in time: {0}")]
    Timeout(String),
    #[error("cache error: {0}")]
    Operation(String),
}

/// Failures reported by a [`Repository`](crate::Repository) backend.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The short code is already mapped to a URL.
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("store is unreachable: {0}")]
    Unavailable(String),
    #[error("store did not answer in time: {0}")]
    Timeout(String),
    #[error("store rejected the query: {0}")]
    Query(String),
    #[error("store returned malformed data: {0}")]
    InvalidData(String),
}

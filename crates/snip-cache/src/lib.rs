//! Cache implementations for snip.

pub mod moka;

pub use self::moka::{CacheConfig, MokaUrlCache, DEFAULT_MAX_CAPACITY, DEFAULT_TTL};
pub use snip_core::{CacheError, UrlCache};

//! Core types and traits for the snip URL shortener.
//!
//! This crate provides the types shared by the shortener service, the
//! cache and storage backends, and the HTTP gateway.

pub mod cache;
pub mod error;
pub mod repository;
pub mod shortcode;

pub use cache::UrlCache;
pub use error::{CacheError, CoreError, StorageError};
pub use repository::{ReadRepository, Repository, UrlRecord};
pub use shortcode::{ShortCode, SHORT_CODE_LENGTH};

//! URL shortener service implementation.
//!
//! This crate provides [`ShortenerService`], which turns URLs into short
//! codes and resolves them back through a cache in front of a durable store.

pub mod error;
pub mod service;
pub mod shortener;

pub use error::{Result, ShortenerError};
pub use service::{ShortenerService, MAX_REGENERATIONS};
pub use shortener::Shortener;

//! Durable store implementations for snip.

pub mod memory;
pub mod mysql;

pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
pub use snip_core::{ReadRepository, Repository, StorageError};

//! Concrete capability adapters.
//!
//! Only the result store ships with adapters; producer and search provider
//! implementations live downstream of this crate.

pub mod memory_store;
pub mod sqlite;

pub use memory_store::MemoryResultStore;
pub use sqlite::SqliteResultStore;

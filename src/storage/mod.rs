//! Key-value substrate the favorites collection is persisted in.
//!
//! Values are opaque strings; whoever owns a key decides on the encoding.

pub mod db;
pub mod error;
pub mod memory;
pub(crate) mod schema;

pub use db::SqliteStore;
pub use error::StorageError;
pub use memory::MemoryStore;

/// A namespaced slot store with whole-value reads and writes.
pub trait KeyValueStore {
    /// Returns `None` when nothing was ever written under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces whatever is stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

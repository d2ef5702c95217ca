//! Session storage layer
//!
//! The filter store and the auth session persist through the
//! [`SessionStorage`] port. Two adapters are provided: an in-memory map for
//! tests and embedded use, and a directory-backed store for the CLI.
mod file;
mod memory;
mod traits;

pub use file::FileSessionStorage;
pub use memory::MemorySessionStorage;
pub use traits::{SessionStorage, StorageError};

/// Read and deserialize a JSON value stored under `key`.
pub fn get_json<T: serde::de::DeserializeOwned>(
    storage: &dyn SessionStorage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get_item(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `value` as JSON and store it under `key`.
pub fn set_json<T: serde::Serialize>(
    storage: &dyn SessionStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)?;
    storage.set_item(key, &raw)
}

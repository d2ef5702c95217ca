//! Session storage trait
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value store scoped to one browsing session.
///
/// Values survive reloads within the session and are dropped when it ends.
/// Mirrors the browser `sessionStorage` API so the filter store and auth
/// session can be tested against an in-memory implementation.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every entry in this session.
    fn clear(&self) -> Result<(), StorageError>;
}

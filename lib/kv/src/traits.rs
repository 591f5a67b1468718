use crate::error::KvError;

/// KvStore provides a key-value storage interface.
///
/// Keys follow a namespaced convention: `fleet:device:DEV001`,
/// `fleet:contract:AMC001`, etc. One collection per prefix.
pub trait KvStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// Set a key-value pair.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError>;

    /// Delete a key. Deleting a missing key is a no-op.
    fn delete(&self, key: &str) -> Result<(), KvError>;

    /// Scan all keys matching a prefix. Returns (key, value) pairs sorted by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KvError>;

    /// Set several key-value pairs in one call. Used by seeding.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KvError>;
}

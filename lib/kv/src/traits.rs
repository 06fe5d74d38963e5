use crate::error::KvError;

/// KvStore provides the key-value storage interface beneath the live layer.
///
/// Keys are `/`-separated paths: `venues/1`, `venues/1/checkins/u42`,
/// `posts/-O3k.../likes/u42`, etc. Keys seeded from the venue catalog
/// live in a read-only layer; everything else is read-write.
pub trait KvStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// Set a key-value pair. Returns KvError::ReadOnly if the key is in the
    /// read-only layer.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError>;

    /// Delete a key. Returns KvError::ReadOnly if the key is in the read-only
    /// layer. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), KvError>;

    /// Scan all keys matching a prefix. Returns sorted (key, value) pairs.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KvError>;

    /// Check whether a key is in the read-only layer.
    fn is_readonly(&self, key: &str) -> bool;
}

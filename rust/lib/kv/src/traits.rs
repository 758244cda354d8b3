use crate::error::KVError;

/// Byte-oriented key-value storage.
///
/// Keys are namespaced strings (`sys:menu:00000000000000000007`). `scan`
/// returns entries in ascending key order, so zero-padded numeric suffixes
/// iterate in numeric order.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;

    /// Write several entries in one transaction.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError>;

    /// Delete several keys in one transaction.
    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError>;

    /// All (key, value) pairs whose key starts with `prefix`, sorted by key.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError>;
}

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::KVError;
use crate::traits::KVStore;

/// In-process KVStore over a `BTreeMap`. Nothing survives the process;
/// used by tests and by `admind --ephemeral`.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>>, KVError> {
        self.entries.read().map_err(|_| KVError::Storage("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>>, KVError> {
        self.entries.write().map_err(|_| KVError::Storage("memory store lock poisoned".into()))
    }
}

impl KVStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.write()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KVError> {
        self.write()?.remove(key);
        Ok(())
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let mut map = self.write()?;
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_vec());
        }
        Ok(())
    }

    fn batch_delete(&self, keys: &[&str]) -> Result<(), KVError> {
        let mut map = self.write()?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KVError> {
        Ok(self
            .read()?
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_is_sorted_and_prefix_bounded() {
        let store = MemoryStore::new();
        store.set("sys:role:2", b"b").unwrap();
        store.set("sys:role:1", b"a").unwrap();
        store.set("sys:user:1", b"u").unwrap();

        let roles = store.scan("sys:role:").unwrap();
        assert_eq!(
            roles,
            vec![
                ("sys:role:1".to_string(), b"a".to_vec()),
                ("sys:role:2".to_string(), b"b".to_vec()),
            ]
        );
    }

    #[test]
    fn test_batch_roundtrip() {
        let store = MemoryStore::new();
        store
            .batch_set(&[("k:1", b"1".as_slice()), ("k:2", b"2".as_slice())])
            .unwrap();
        assert_eq!(store.get("k:2").unwrap(), Some(b"2".to_vec()));
        store.batch_delete(&["k:1", "k:2"]).unwrap();
        assert!(store.scan("k:").unwrap().is_empty());
    }
}

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::KvError;
use crate::traits::KvStore;

/// In-memory KV store backed by an ordered map.
///
/// `BTreeMap` keeps keys sorted, so prefix scans are a bounded range walk
/// rather than a full-table filter. All access goes through one `RwLock`:
/// readers run concurrently, each write is observed atomically by every
/// subsequent read.
pub struct MemStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemStore {
    /// Create a new empty MemStore.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let entries = self.entries.read().unwrap();
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let mut entries = self.entries.write().unwrap();
        tracing::trace!(key, len = value.len(), "kv set");
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        let mut entries = self.entries.write().unwrap();
        tracing::trace!(key, "kv delete");
        entries.remove(key);
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KvError> {
        let entries = self.entries.read().unwrap();
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn batch_set(&self, batch: &[(&str, &[u8])]) -> Result<(), KvError> {
        let mut entries = self.entries.write().unwrap();
        for (key, value) in batch {
            entries.insert((*key).to_string(), value.to_vec());
        }
        tracing::trace!(count = batch.len(), "kv batch set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let kv = MemStore::new();
        kv.set("a", b"1").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some(&b"1"[..]));
    }

    #[test]
    fn get_missing_returns_none() {
        let kv = MemStore::new();
        assert!(kv.get("nope").unwrap().is_none());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let kv = MemStore::new();
        kv.set("a", b"1").unwrap();
        kv.set("a", b"2").unwrap();
        assert_eq!(kv.get("a").unwrap().as_deref(), Some(&b"2"[..]));
        assert_eq!(kv.len(), 1);
    }

    #[test]
    fn delete_removes_key() {
        let kv = MemStore::new();
        kv.set("a", b"1").unwrap();
        kv.delete("a").unwrap();
        assert!(kv.get("a").unwrap().is_none());
    }

    #[test]
    fn delete_missing_is_noop() {
        let kv = MemStore::new();
        kv.delete("ghost").unwrap();
    }

    #[test]
    fn scan_returns_sorted_prefix_matches() {
        let kv = MemStore::new();
        kv.set("fleet:device:3", b"c").unwrap();
        kv.set("fleet:device:1", b"a").unwrap();
        kv.set("fleet:device:2", b"b").unwrap();
        kv.set("fleet:alert:1", b"x").unwrap();

        let results = kv.scan("fleet:device:").unwrap();
        let keys: Vec<&str> = results.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["fleet:device:1", "fleet:device:2", "fleet:device:3"]);
    }

    #[test]
    fn scan_does_not_match_similar_prefix() {
        let kv = MemStore::new();
        kv.set("fleet:device:1", b"a").unwrap();
        kv.set("fleet:devicegroup:1", b"b").unwrap();

        let results = kv.scan("fleet:device:").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, "fleet:device:1");
    }

    #[test]
    fn scan_empty_store() {
        let kv = MemStore::new();
        assert!(kv.scan("any:prefix:").unwrap().is_empty());
    }

    #[test]
    fn batch_set_inserts_all() {
        let kv = MemStore::new();
        kv.batch_set(&[("a", &b"1"[..]), ("b", &b"2"[..])]).unwrap();
        assert_eq!(kv.len(), 2);
        assert_eq!(kv.get("b").unwrap().as_deref(), Some(&b"2"[..]));
    }

    #[test]
    fn concurrent_set_and_scan() {
        use std::sync::Arc;
        use std::thread;

        let kv = Arc::new(MemStore::new());
        let mut handles = vec![];

        let kv_w = kv.clone();
        handles.push(thread::spawn(move || {
            for i in 0..500 {
                kv_w.set(&format!("item:{i:04}"), b"v").unwrap();
            }
        }));

        let kv_r = kv.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..500 {
                let _ = kv_r.get("item:0000").unwrap();
                let _ = kv_r.scan("item:").unwrap();
            }
        }));

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(kv.len(), 500);
    }
}

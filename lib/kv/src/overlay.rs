use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use crate::error::KvError;
use crate::traits::KvStore;

/// OverlayKv is a two-layer KvStore:
///
/// - **Seed layer** (read-only, higher priority): populated at startup
///   from configuration, e.g. the venue catalog.
/// - **DB layer** (read-write): backed by a concrete KvStore.
///
/// Reads check the seed layer first; a seed key shadows any DB value.
/// Writes and deletes against seed keys fail with `KvError::ReadOnly`.
/// `scan` merges both layers, seed entries winning on duplicate keys.
pub struct OverlayKv<DB: KvStore> {
    seed: RwLock<BTreeMap<String, Vec<u8>>>,
    db: DB,
}

impl<DB: KvStore> OverlayKv<DB> {
    /// Create an OverlayKv with an empty seed layer over the given DB.
    pub fn new(db: DB) -> Self {
        Self {
            seed: RwLock::new(BTreeMap::new()),
            db,
        }
    }

    /// Insert an entry into the read-only seed layer. Called during
    /// startup, before the store is shared.
    pub fn insert_seed_entry(&self, key: String, value: Vec<u8>) {
        let mut seed = self.seed.write().unwrap();
        seed.insert(key, value);
    }

    /// Number of entries in the seed layer.
    pub fn seed_len(&self) -> usize {
        self.seed.read().unwrap().len()
    }
}

impl<DB: KvStore> KvStore for OverlayKv<DB> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        {
            let seed = self.seed.read().unwrap();
            if let Some(value) = seed.get(key) {
                return Ok(Some(value.clone()));
            }
        }
        self.db.get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        if self.is_readonly(key) {
            return Err(KvError::ReadOnly(key.to_string()));
        }
        self.db.set(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        if self.is_readonly(key) {
            return Err(KvError::ReadOnly(key.to_string()));
        }
        self.db.delete(key)
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KvError> {
        let seed = self.seed.read().unwrap();
        let db_entries = self.db.scan(prefix)?;

        let mut seen = BTreeSet::new();
        let mut results = Vec::new();

        for (key, value) in seed.range(prefix.to_string()..) {
            if !key.starts_with(prefix) {
                break;
            }
            seen.insert(key.clone());
            results.push((key.clone(), value.clone()));
        }

        for (key, value) in db_entries {
            if !seen.contains(&key) {
                results.push((key, value));
            }
        }

        results.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(results)
    }

    fn is_readonly(&self, key: &str) -> bool {
        let seed = self.seed.read().unwrap();
        seed.contains_key(key)
    }
}

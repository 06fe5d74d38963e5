use std::path::Path;
use std::sync::Arc;

use redb::{Database, TableDefinition};

use crate::error::KvError;
use crate::traits::KvStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("barhop");

fn storage_err(e: impl std::fmt::Display) -> KvError {
    KvError::Storage(e.to_string())
}

/// RedbStore is a KvStore backed by redb, a pure-Rust embedded key-value
/// database. All keys are read-write; the read-only venue catalog layer
/// sits above this in [`crate::OverlayKv`].
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KvError> {
        let db = Database::create(path).map_err(storage_err)?;

        // Ensure the table exists by doing a write transaction.
        let write_txn = db.begin_write().map_err(storage_err)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl KvStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(TABLE).map_err(storage_err)?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(storage_err(e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            table.insert(key, value).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), KvError> {
        let write_txn = self.db.begin_write().map_err(storage_err)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage_err)?;
            table.remove(key).map_err(storage_err)?;
        }
        write_txn.commit().map_err(storage_err)?;
        Ok(())
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, KvError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(TABLE).map_err(storage_err)?;

        let mut results = Vec::new();
        let iter = table.range(prefix..).map_err(storage_err)?;

        for entry in iter {
            let entry = entry.map_err(storage_err)?;
            let key = entry.0.value().to_string();
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key, entry.1.value().to_vec()));
        }

        Ok(results)
    }

    fn is_readonly(&self, _key: &str) -> bool {
        false
    }
}

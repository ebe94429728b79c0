//! Sled-backed date cache.

use crate::error::StorageError;
use crate::store::{DateCache, DateCacheEntry};
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

const DATES_TREE: &str = "dates";

/// A just-dropped handle can hold the file lock for a moment while sled's
/// background writers finish.
const LOCK_RETRIES: u32 = 40;
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(25);

/// Holds the `Db` handle so the file lock lives exactly as long as the cache.
pub struct SledDateCache {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledDateCache {
    /// Open (or create) the cache database at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(path)?;
        let mut attempt = 0;
        let db = loop {
            match sled::open(path) {
                Ok(db) => break db,
                Err(sled::Error::Io(e))
                    if e.kind() == ErrorKind::WouldBlock && attempt < LOCK_RETRIES =>
                {
                    attempt += 1;
                    debug!(path = %path.display(), attempt, "Date cache locked, retrying");
                    std::thread::sleep(LOCK_RETRY_DELAY);
                }
                Err(e) => return Err(e.into()),
            }
        };
        Self::from_db(&db)
    }

    /// Throwaway cache removed when dropped.
    pub fn temporary() -> Result<Self, StorageError> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(&db)
    }

    pub fn from_db(db: &sled::Db) -> Result<Self, StorageError> {
        Ok(Self {
            db: db.clone(),
            tree: db.open_tree(DATES_TREE)?,
        })
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }
}

impl Drop for SledDateCache {
    fn drop(&mut self) {
        if let Err(e) = self.db.flush() {
            warn!(error = %e, "Failed to flush date cache on drop");
        }
    }
}

impl DateCache for SledDateCache {
    fn get(&self, key: &str) -> Result<Option<DateCacheEntry>, StorageError> {
        match self.tree.get(key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, entry: &DateCacheEntry) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(entry)?;
        self.tree.insert(key.as_bytes(), bytes)?;
        Ok(())
    }
}

use crate::core::error::{RateError, Result};
use crate::core::rates::RateSnapshot;
use crate::store::{DiskStore, TextStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Persists a single [`RateSnapshot`] as pretty-printed JSON at one path.
///
/// The whole snapshot is written and read at once; there is no locking, so
/// concurrent writers from several processes end up last-writer-wins.
#[derive(Clone)]
pub struct RateCache {
    path: PathBuf,
    store: Arc<dyn TextStore>,
}

impl RateCache {
    /// Creates a cache backed by the filesystem. Does not touch the disk.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_store(path, Arc::new(DiskStore::new()))
    }

    pub fn with_store<P: AsRef<Path>>(path: P, store: Arc<dyn TextStore>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(RateError::Config(
                "Path to cache file not specified".to_string(),
            ));
        }
        Ok(Self {
            path: path.to_path_buf(),
            store,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cached snapshot verbatim.
    ///
    /// Fails with [`RateError::NotFound`] if nothing was saved yet and with
    /// [`RateError::DataFormat`] if the file is not a JSON object of numbers.
    pub async fn get(&self) -> Result<RateSnapshot> {
        if !self.store.exists(&self.path).await? {
            debug!("Cache MISS: {}", self.path.display());
            return Err(RateError::NotFound(self.path.clone()));
        }

        let contents = self.store.read(&self.path).await?;
        let snapshot: RateSnapshot = serde_json::from_str(&contents).map_err(|e| {
            RateError::DataFormat(format!(
                "Failed to parse cache file {}: {e}",
                self.path.display()
            ))
        })?;
        debug!(
            "Cache HIT: {} ({} quotes)",
            self.path.display(),
            snapshot.len()
        );
        Ok(snapshot)
    }

    /// Replaces the cached snapshot.
    pub async fn save(&self, snapshot: &RateSnapshot) -> Result<()> {
        let contents = serde_json::to_string_pretty(snapshot).map_err(|e| {
            RateError::DataFormat(format!("Failed to serialize rates: {e}"))
        })?;
        self.store.write(&self.path, &contents).await?;
        debug!(
            "Cache PUT: {} ({} quotes)",
            self.path.display(),
            snapshot.len()
        );
        Ok(())
    }

    /// Deletes the cache file; a missing file is not an error.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(&self.path).await?;
        debug!("Cache CLEAR: {}", self.path.display());
        Ok(())
    }
}

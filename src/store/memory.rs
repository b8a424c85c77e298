use super::TextStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory store, keyed by path. Clones share the same files.
#[derive(Clone, Default)]
pub struct MemoryStore {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryStore {
    /// Creates a new, empty MemoryStore
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TextStore for MemoryStore {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        Ok(self.files.lock().await.contains_key(path))
    }

    async fn read(&self, path: &Path) -> io::Result<String> {
        self.files.lock().await.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        debug!("Memory store PUT {}", path.display());
        self.files
            .lock()
            .await
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        debug!("Memory store REMOVE {}", path.display());
        self.files.lock().await.remove(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_shared_between_clones() {
        let store = MemoryStore::new();
        let other = store.clone();
        let path = Path::new("rates.json");

        assert!(!store.exists(path).await.unwrap());
        store.write(path, "abc").await.unwrap();

        assert!(other.exists(path).await.unwrap());
        assert_eq!(other.read(path).await.unwrap(), "abc");

        other.remove(path).await.unwrap();
        assert!(!store.exists(path).await.unwrap());
        assert_eq!(
            store.read(path).await.unwrap_err().kind(),
            io::ErrorKind::NotFound
        );

        // Removing twice is a no-op
        store.remove(path).await.unwrap();
    }
}

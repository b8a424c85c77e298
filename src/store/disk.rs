use super::TextStore;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Filesystem-backed store.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl DiskStore {
    pub fn new() -> Self {
        Self
    }

    fn staging_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("cache"));
        name.push(".tmp");
        path.with_file_name(name)
    }
}

#[async_trait]
impl TextStore for DiskStore {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        fs::try_exists(path).await
    }

    async fn read(&self, path: &Path) -> io::Result<String> {
        debug!("Reading {}", path.display());
        fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let staging = Self::staging_path(path);
        fs::write(&staging, contents).await?;
        if let Err(e) = fs::rename(&staging, path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e);
        }
        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        match fs::remove_file(path).await {
            Ok(()) => {
                debug!("Removed {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

//! Text storage backends used by the rate cache.

pub mod disk;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use std::io;
use std::path::Path;

pub use disk::DiskStore;
#[cfg(test)]
pub use memory::MemoryStore;

/// Whole-file text storage addressed by path.
#[async_trait]
pub trait TextStore: Send + Sync {
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    async fn read(&self, path: &Path) -> io::Result<String>;

    /// Replaces the content at `path`; readers see either the old or new text.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Removes the content at `path`. Absent paths are not an error.
    async fn remove(&self, path: &Path) -> io::Result<()>;
}

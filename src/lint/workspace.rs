//! The host boundary for file access.
//!
//! The engine never touches the filesystem directly; an injected
//! [`Workspace`] supplies document text and stat information. The CLI uses
//! [`FsWorkspace`] over async file IO, while editor hosts can serve unsaved
//! buffers from memory ([`MemoryWorkspace`]).

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

/// Result of a filesystem stat through the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStat {
    /// Nothing exists at the path.
    Missing,
    /// A regular file with its byte size.
    File { size: u64 },
    /// A directory.
    Directory,
}

impl FileStat {
    /// Whether the path exists at all.
    pub fn exists(self) -> bool {
        !matches!(self, FileStat::Missing)
    }

    /// Whether the path is a regular file.
    pub fn is_file(self) -> bool {
        matches!(self, FileStat::File { .. })
    }
}

/// File access supplied by the host.
#[async_trait]
pub trait Workspace: Send + Sync {
    /// Read the full text of a document.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Stat a path.
    async fn stat(&self, path: &Path) -> FileStat;
}

/// Workspace over the real filesystem.
#[derive(Debug, Default)]
pub struct FsWorkspace;

#[async_trait]
impl Workspace for FsWorkspace {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn stat(&self, path: &Path) -> FileStat {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => FileStat::Directory,
            Ok(meta) => FileStat::File { size: meta.len() },
            Err(_) => FileStat::Missing,
        }
    }
}

/// In-memory workspace for embedding hosts and tests.
///
/// Tracks how many reads actually hit it, which makes cache-idempotence
/// observable from the outside.
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    files: Mutex<HashMap<PathBuf, String>>,
    reads: AtomicUsize,
}

impl MemoryWorkspace {
    /// Create an empty in-memory workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a file.
    pub fn insert(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files
            .lock()
            .expect("workspace lock poisoned")
            .insert(path.into(), text.into());
    }

    /// Number of reads served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Workspace for MemoryWorkspace {
    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.files
            .lock()
            .expect("workspace lock poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such document"))
    }

    async fn stat(&self, path: &Path) -> FileStat {
        let files = self.files.lock().expect("workspace lock poisoned");
        if let Some(text) = files.get(path) {
            return FileStat::File {
                size: text.len() as u64,
            };
        }
        // A directory "exists" if any stored file lives beneath it.
        if files.keys().any(|p| p.starts_with(path) && p != path) {
            return FileStat::Directory;
        }
        FileStat::Missing
    }
}

//! Loading of include file contents.
//!
//! The expander never opens files directly; it asks a [`SourceLoader`]. The
//! [`BufferCache`] loader reuses content that is already in memory (files
//! the host has open, or files read earlier in the same build) instead of
//! reading them from disk again.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

/// Supplies the full text of a file.
pub trait SourceLoader {
    /// Returns the content of `path`.
    fn load(&mut self, path: &Path) -> std::io::Result<Arc<str>>;
}

/// Reads every request from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskSource;

impl SourceLoader for DiskSource {
    fn load(&mut self, path: &Path) -> std::io::Result<Arc<str>> {
        debug!(path = %path.display(), "reading include file");
        std::fs::read_to_string(path).map(Arc::from)
    }
}

/// Open-or-reuse loader.
///
/// Buffers registered with [`BufferCache::open`] (or loaded earlier) are
/// shared; everything else is read from disk once and kept.
#[derive(Debug, Default)]
pub struct BufferCache {
    buffers: HashMap<PathBuf, Arc<str>>,
    hits: usize,
    reads: usize,
}

impl BufferCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an in-memory buffer for `path`, shadowing the file on disk.
    pub fn open(&mut self, path: impl Into<PathBuf>, content: impl Into<Arc<str>>) {
        self.buffers.insert(path.into(), content.into());
    }

    /// Returns true if `path` has a buffer.
    pub fn is_open(&self, path: &Path) -> bool {
        self.buffers.contains_key(path)
    }

    /// Number of buffers held.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns true if no buffers are held.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Number of loads answered from an existing buffer.
    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of loads that went to disk.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl SourceLoader for BufferCache {
    fn load(&mut self, path: &Path) -> std::io::Result<Arc<str>> {
        if let Some(content) = self.buffers.get(path) {
            self.hits += 1;
            return Ok(Arc::clone(content));
        }

        let content = DiskSource.load(path)?;
        self.reads += 1;
        self.buffers.insert(path.to_path_buf(), Arc::clone(&content));
        Ok(content)
    }
}

impl<S: SourceLoader + ?Sized> SourceLoader for &mut S {
    fn load(&mut self, path: &Path) -> std::io::Result<Arc<str>> {
        (**self).load(path)
    }
}

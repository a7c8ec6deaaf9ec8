//! Filesystem capabilities consumed by the tree engine.
//!
//! The walker, prober and reconciler never touch `std::fs` directly. They go
//! through an [`FsProvider`], which makes the whole engine testable against
//! an in-memory filesystem.

mod local;
mod memory;

use std::fmt::Debug;
use std::io;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use local::LocalFs;
pub use memory::{MemoryEntry, MemoryProvider};

/// Kind of resource reported by a stat call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    /// Sockets, devices, fifos and the like. Never part of a tree.
    Other,
}

/// Result of a stat call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    /// Size in bytes.
    pub size: u64,
    /// Resource kind.
    pub kind: EntryKind,
    /// Creation time, when the platform reports one.
    pub created: Option<DateTime<Utc>>,
    /// Last modification time.
    pub modified: Option<DateTime<Utc>>,
}

impl Stats {
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Asynchronous filesystem operations used to build trees.
#[async_trait]
pub trait FsProvider: Send + Sync + Debug {
    /// List the names of the entries of a directory.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Stat a resource, following symlinks.
    async fn stat(&self, path: &Path) -> io::Result<Stats>;

    /// Read the full content of a file.
    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;
}

//! In-memory filesystem provider.
//!
//! Entries are keyed by absolute path. Directory listings are explicit, so a
//! listing may name entries that do not exist (their stat fails), which is
//! how vanished resources are simulated.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use super::{EntryKind, FsProvider, Stats};

/// A single in-memory resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryEntry {
    /// Directory with the given child names.
    Dir(Vec<String>),
    /// File with the given content.
    File(Vec<u8>),
    /// Directory that can be stat-ed but not listed.
    UnreadableDir,
    /// File that can be stat-ed but not read.
    UnreadableFile,
}

impl MemoryEntry {
    /// Directory entry listing `names`.
    #[must_use]
    pub fn dir(names: &[&str]) -> Self {
        Self::Dir(names.iter().map(ToString::to_string).collect())
    }

    /// File entry holding `content`.
    #[must_use]
    pub fn file(content: impl AsRef<[u8]>) -> Self {
        Self::File(content.as_ref().to_vec())
    }
}

#[derive(Debug, Clone)]
struct Stamped {
    entry: MemoryEntry,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

/// Provider serving resources from a mutable in-memory map.
///
/// The map sits behind a lock so a test can keep an `Arc` to the provider
/// and rewrite the "filesystem" while a `TreeView` is using it.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    entries: RwLock<HashMap<PathBuf, Stamped>>,
}

impl MemoryProvider {
    /// Create an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider holding `entries`.
    pub fn with_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (P, MemoryEntry)>,
        P: Into<PathBuf>,
    {
        let provider = Self::new();
        provider.replace(entries);
        provider
    }

    /// Insert or overwrite a single entry.
    pub fn insert(&self, path: impl Into<PathBuf>, entry: MemoryEntry) {
        let path = path.into();
        let now = Utc::now();
        let mut entries = self.entries.write();
        let created = entries.get(&path).map_or(now, |old| old.created);
        entries.insert(
            path,
            Stamped {
                entry,
                created,
                modified: now,
            },
        );
    }

    /// Remove an entry, returning it if it existed.
    pub fn remove(&self, path: impl AsRef<Path>) -> Option<MemoryEntry> {
        self.entries
            .write()
            .remove(path.as_ref())
            .map(|stamped| stamped.entry)
    }

    /// Replace the whole state with `entries`.
    pub fn replace<I, P>(&self, entries: I)
    where
        I: IntoIterator<Item = (P, MemoryEntry)>,
        P: Into<PathBuf>,
    {
        self.entries.write().clear();
        for (path, entry) in entries {
            self.insert(path, entry);
        }
    }

    /// Number of entries currently stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the provider holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn lookup(&self, path: &Path) -> io::Result<Stamped> {
        self.entries.read().get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file or directory: {}", path.display()),
            )
        })
    }
}

fn permission_denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", path.display()),
    )
}

#[async_trait]
impl FsProvider for MemoryProvider {
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        match self.lookup(path)?.entry {
            MemoryEntry::Dir(names) => Ok(names),
            MemoryEntry::UnreadableDir => Err(permission_denied(path)),
            MemoryEntry::File(_) | MemoryEntry::UnreadableFile => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("not a directory: {}", path.display()),
            )),
        }
    }

    async fn stat(&self, path: &Path) -> io::Result<Stats> {
        let stamped = self.lookup(path)?;
        let (kind, size) = match &stamped.entry {
            MemoryEntry::Dir(_) | MemoryEntry::UnreadableDir => (EntryKind::Dir, 0),
            MemoryEntry::File(content) => (EntryKind::File, content.len() as u64),
            MemoryEntry::UnreadableFile => (EntryKind::File, 0),
        };
        Ok(Stats {
            size,
            kind,
            created: Some(stamped.created),
            modified: Some(stamped.modified),
        })
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.lookup(path)?.entry {
            MemoryEntry::File(content) => Ok(content),
            MemoryEntry::UnreadableFile => Err(permission_denied(path)),
            MemoryEntry::Dir(_) | MemoryEntry::UnreadableDir => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("is a directory: {}", path.display()),
            )),
        }
    }
}

//! Real filesystem provider backed by `tokio::fs`.

use std::fs::Metadata;
use std::io;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{EntryKind, FsProvider, Stats};

/// Provider reading from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFs;

#[async_trait]
impl FsProvider for LocalFs {
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    async fn stat(&self, path: &Path) -> io::Result<Stats> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(Stats::from(&metadata))
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}

impl From<&Metadata> for Stats {
    fn from(metadata: &Metadata) -> Self {
        let kind = if metadata.is_file() {
            EntryKind::File
        } else if metadata.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::Other
        };

        Self {
            size: metadata.len(),
            kind,
            // Not every filesystem records a birth time.
            created: metadata.created().ok().map(DateTime::<Utc>::from),
            modified: metadata.modified().ok().map(DateTime::<Utc>::from),
        }
    }
}

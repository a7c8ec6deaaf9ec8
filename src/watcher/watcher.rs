//! File system watcher using notify-rs.

#![allow(clippy::used_underscore_binding)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use tokio::sync::mpsc;

use super::events::ChangeBatch;
use super::source::ChangeSource;
use crate::error::WatcherError;
use crate::Result;

/// Default debounce duration for file events.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Capacity of the batch channel between the notify thread and the session.
const BATCH_CHANNEL_CAPACITY: usize = 100;

/// Recursive watcher over a single root directory.
///
/// Events are debounced by notify, then de-duplicated and restricted to
/// paths under the root before being handed out as one batch.
pub struct FileWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    batch_rx: mpsc::Receiver<Vec<PathBuf>>,
    root: PathBuf,
}

impl std::fmt::Debug for FileWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWatcher")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl FileWatcher {
    /// Start watching `root` recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` does not exist or cannot be watched.
    pub fn new(root: impl AsRef<Path>, debounce: Duration) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            return Err(WatcherError::WatchFailed {
                path: root.display().to_string(),
                reason: "directory does not exist".to_string(),
            }
            .into());
        }

        let (batch_tx, batch_rx) = mpsc::channel(BATCH_CHANNEL_CAPACITY);
        let watched_root = root.clone();

        let mut debouncer = new_debouncer(
            debounce,
            move |result: std::result::Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    let mut batch = ChangeBatch::new();
                    batch.extend(events.into_iter().map(|event| event.path));
                    batch.retain_under(&watched_root);

                    if !batch.is_empty() {
                        tracing::trace!(paths = batch.len(), "Debounced change batch");
                        if batch_tx.blocking_send(batch.into_paths()).is_err() {
                            tracing::trace!("Change batch dropped, no session is listening");
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Watch error: {:?}", e);
                }
            },
        )
        .map_err(|e| WatcherError::WatchFailed {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;

        debouncer
            .watcher()
            .watch(&root, RecursiveMode::Recursive)
            .map_err(|e| WatcherError::WatchFailed {
                path: root.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!(path = %root.display(), "Watching directory");

        Ok(Self {
            _debouncer: debouncer,
            batch_rx,
            root,
        })
    }

    /// Watched root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Receive the next batch of changed paths.
    ///
    /// Returns `None` if the watcher has been dropped.
    pub async fn recv(&mut self) -> Option<Vec<PathBuf>> {
        self.batch_rx.recv().await
    }
}

#[async_trait]
impl ChangeSource for FileWatcher {
    async fn next_batch(&mut self) -> Option<Vec<PathBuf>> {
        self.recv().await
    }

    fn try_next_batch(&mut self) -> Option<Vec<PathBuf>> {
        self.batch_rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_watcher_nonexistent_dir() {
        let result = FileWatcher::new("/nonexistent/directory", DEFAULT_DEBOUNCE);
        assert!(result.is_err());
    }

    #[test]
    fn test_watcher_watches_root() {
        let tmp = TempDir::new().unwrap();
        let watcher = FileWatcher::new(tmp.path(), DEFAULT_DEBOUNCE).unwrap();
        assert_eq!(watcher.root(), tmp.path());
    }

    #[tokio::test]
    async fn test_watcher_reports_created_file() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        let mut watcher = FileWatcher::new(&root, Duration::from_millis(50)).unwrap();

        std::fs::write(root.join("new.txt"), "x").unwrap();

        let batch = tokio::time::timeout(Duration::from_secs(5), watcher.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(batch.iter().all(|p| p.starts_with(&root)));
        assert!(batch.contains(&root.join("new.txt")));
    }
}

//! Sources of changed-path batches.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Delivers batches of changed absolute paths to a watch session.
///
/// Batches are expected to be debounced already; the session only merges
/// batches that queued up while it was busy.
#[async_trait]
pub trait ChangeSource: Send + 'static {
    /// Wait for the next batch. `None` once the source is exhausted.
    async fn next_batch(&mut self) -> Option<Vec<PathBuf>>;

    /// Take a batch that is already queued, without waiting.
    fn try_next_batch(&mut self) -> Option<Vec<PathBuf>>;
}

#[async_trait]
impl ChangeSource for mpsc::Receiver<Vec<PathBuf>> {
    async fn next_batch(&mut self) -> Option<Vec<PathBuf>> {
        self.recv().await
    }

    fn try_next_batch(&mut self) -> Option<Vec<PathBuf>> {
        self.try_recv().ok()
    }
}

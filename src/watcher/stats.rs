//! Watch session counters.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::tree::TreeChange;

/// Statistics for a watch session.
#[derive(Debug, Default)]
pub struct SessionStats {
    pub batches: AtomicU64,
    pub paths: AtomicU64,
    pub added: AtomicU64,
    pub changed: AtomicU64,
    pub unlinked: AtomicU64,
    pub events: AtomicU64,
}

impl SessionStats {
    /// Create new stats tracker.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Count one refresh cycle over `paths` changed paths.
    pub fn record_batch(&self, paths: usize) {
        self.batches.fetch_add(1, Ordering::Relaxed);
        self.paths.fetch_add(paths as u64, Ordering::Relaxed);
    }

    pub fn record_change(&self, change: &TreeChange) {
        let counter = match change {
            TreeChange::Add(_) => &self.added,
            TreeChange::Change(_) => &self.changed,
            TreeChange::Unlink(_) => &self.unlinked,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_event(&self) {
        self.events.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of current stats.
    #[must_use]
    pub fn snapshot(&self) -> SessionStatsSnapshot {
        SessionStatsSnapshot {
            batches: self.batches.load(Ordering::Relaxed),
            paths: self.paths.load(Ordering::Relaxed),
            added: self.added.load(Ordering::Relaxed),
            changed: self.changed.load(Ordering::Relaxed),
            unlinked: self.unlinked.load(Ordering::Relaxed),
            events: self.events.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of session stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStatsSnapshot {
    pub batches: u64,
    pub paths: u64,
    pub added: u64,
    pub changed: u64,
    pub unlinked: u64,
    /// Events handed to the session's channel.
    pub events: u64,
}

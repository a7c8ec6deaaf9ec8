//! Live tree watching.
//!
//! This module provides:
//! - Directory watching using notify-rs with debounced batches
//! - A pluggable source of changed-path batches
//! - The watch session that owns a tree and publishes change events

mod events;
mod session;
mod source;
mod stats;
#[allow(clippy::module_inception)]
mod watcher;

pub use events::{ChangeBatch, TreeEvent};
pub use session::{watch_tree, WatchSession};
pub use source::ChangeSource;
pub use stats::{SessionStats, SessionStatsSnapshot};
pub use watcher::{FileWatcher, DEFAULT_DEBOUNCE};

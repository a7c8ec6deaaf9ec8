//! treeview
//!
//! Recursive filesystem tree snapshots, optionally with file contents, kept
//! incrementally in sync with live filesystem changes.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod helper;
pub mod observability;
pub mod provider;
pub mod tree;
pub mod watcher;

pub use config::Config;
pub use error::{Error, Result, TreeError, WatcherError};
pub use provider::{FsProvider, LocalFs, MemoryEntry, MemoryProvider};
pub use tree::{process_tree, Sorting, TreeChange, TreeNode, TreeOptions, TreeResult, TreeView};
pub use watcher::{watch_tree, ChangeSource, TreeEvent, WatchSession};

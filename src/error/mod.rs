//! Error types and Result aliases for treeview.
//!
//! This module defines the error hierarchy used throughout the crate.
//! Failures that concern a single node (stat, read, expansion) are not
//! errors at this level: they are recorded on the node itself.

use thiserror::Error;

/// Result type alias using treeview's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for treeview operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Tree construction or reconciliation error.
    #[error("tree error: {0}")]
    Tree(#[from] TreeError),

    /// File watching error.
    #[error("watcher error: {0}")]
    Watcher(#[from] WatcherError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Tree-specific errors.
#[derive(Error, Debug)]
pub enum TreeError {
    /// A directory could not be listed.
    #[error("failed to read directory '{path}': {reason}")]
    ReadDir { path: String, reason: String },

    /// A glob pattern did not compile.
    #[error("invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    /// A path does not live under the tree root.
    #[error("path '{path}' is outside of the tree root")]
    OutsideRoot { path: String },
}

/// File watcher errors.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// Failed to watch path.
    #[error("failed to watch path '{path}': {reason}")]
    WatchFailed { path: String, reason: String },
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl TreeError {
    /// Create a listing error for `path`.
    pub fn read_dir(path: &std::path::Path, reason: impl ToString) -> Self {
        Self::ReadDir {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;

//! Options controlling how a tree is built.

use std::path::PathBuf;

use serde::Serialize;

/// Ordering applied to each `nodes` list. Error-bearing nodes always go last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Sorting {
    /// By name.
    #[default]
    Alpha,
    /// Files, then directories, each by name.
    FileFirst,
    /// Directories, then files, each by name.
    DirFirst,
}

/// Tree building options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeOptions {
    /// Include hidden resources (names starting with a period).
    pub all: bool,
    /// Include file contents.
    pub content: bool,
    /// Maximum directory depth to expand. `None` means unlimited.
    pub depth: Option<usize>,
    /// Use paths relative to the root instead of absolute paths.
    pub relative: bool,
    /// Directory paths to include.
    pub include: Vec<PathBuf>,
    /// Directory paths to exclude.
    pub exclude: Vec<PathBuf>,
    /// Glob patterns files must match.
    pub glob: Vec<String>,
    /// Ordering of sibling nodes.
    pub sort: Sorting,
}

impl TreeOptions {
    /// Create options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a directory at `depth` gets its children listed.
    #[must_use]
    pub fn expands(&self, depth: usize) -> bool {
        self.depth.map_or(true, |max| depth < max)
    }

    /// Whether a node may exist at `depth` at all.
    #[must_use]
    pub fn allows(&self, depth: usize) -> bool {
        self.depth.map_or(true, |max| depth <= max)
    }
}

/// Check if a resource name is hidden.
#[must_use]
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

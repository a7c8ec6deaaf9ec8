//! Path resolution between absolute filesystem paths and tree paths.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path: drop `.` components and fold `..`.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let climbing = matches!(out.components().next_back(), Some(Component::ParentDir));
                if climbing || out.as_os_str().is_empty() {
                    out.push("..");
                } else {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `path` against `base` unless it is already absolute.
#[must_use]
pub fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Resolve `path` against the current working directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    Ok(resolve(&std::env::current_dir()?, path))
}

/// Path of `to` relative to `from`, or `None` when `to` is not below `from`.
#[must_use]
pub fn relative(from: &Path, to: &Path) -> Option<PathBuf> {
    to.strip_prefix(from).ok().map(Path::to_path_buf)
}

/// Maps between absolute paths and the paths stored in a tree.
///
/// In absolute mode tree paths are absolute; in relative mode they are
/// relative to the root, and top-level nodes have an empty `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRoot {
    absolute: PathBuf,
    relative: bool,
}

impl TreeRoot {
    #[must_use]
    pub const fn new(absolute: PathBuf, relative: bool) -> Self {
        Self { absolute, relative }
    }

    /// Absolute root directory.
    #[must_use]
    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    /// The `path` value carried by top-level nodes.
    #[must_use]
    pub fn tree_path(&self) -> PathBuf {
        if self.relative {
            PathBuf::new()
        } else {
            self.absolute.clone()
        }
    }

    /// Convert an absolute path to a tree path. `None` when outside the root.
    #[must_use]
    pub fn to_tree(&self, absolute: &Path) -> Option<PathBuf> {
        let rel = relative(&self.absolute, absolute)?;
        if self.relative {
            Some(rel)
        } else {
            Some(self.absolute.join(rel))
        }
    }

    /// Convert a tree path back to an absolute path.
    #[must_use]
    pub fn to_absolute(&self, tree_path: &Path) -> PathBuf {
        if self.relative {
            self.absolute.join(tree_path)
        } else {
            tree_path.to_path_buf()
        }
    }

    /// Names of the components of a tree path below the root.
    #[must_use]
    pub fn components(&self, tree_path: &Path) -> Vec<String> {
        let below = if self.relative {
            Some(tree_path)
        } else {
            tree_path.strip_prefix(&self.absolute).ok()
        };
        below
            .map(|p| {
                p.components()
                    .filter_map(|c| match c {
                        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

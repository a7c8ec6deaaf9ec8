//! Include/exclude/glob filtering of probed resources.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::TreeError;
use crate::tree::paths;
use crate::Result;

/// Path filter applied while probing.
///
/// Include and exclude entries are absolute directory paths. Glob patterns
/// are matched against a file's `pathname`.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Vec<PathBuf>,
    exclude: Vec<PathBuf>,
    glob: Option<GlobSet>,
}

impl PathFilter {
    /// Build a filter. Relative include/exclude entries are resolved against
    /// `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob pattern is invalid.
    pub fn new(
        base: &Path,
        include: &[PathBuf],
        exclude: &[PathBuf],
        patterns: &[String],
    ) -> Result<Self> {
        let resolve = |list: &[PathBuf]| -> Vec<PathBuf> {
            list.iter().map(|p| paths::resolve(base, p)).collect()
        };

        Ok(Self {
            include: resolve(include),
            exclude: resolve(exclude),
            glob: build_glob_set(patterns)?,
        })
    }

    /// Check a file. `parent` is the absolute path of its directory.
    #[must_use]
    pub fn accepts_file(&self, pathname: &Path, parent: &Path) -> bool {
        self.matches_glob(pathname) && !self.is_excluded(parent) && self.includes_strict(parent)
    }

    /// Check a directory given its absolute path.
    #[must_use]
    pub fn accepts_dir(&self, path: &Path) -> bool {
        !self.is_excluded(path) && self.includes_loose(path)
    }

    fn matches_glob(&self, pathname: &Path) -> bool {
        self.glob.as_ref().map_or(true, |set| set.is_match(pathname))
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.iter().any(|dir| path.starts_with(dir))
    }

    // The directory itself lies under an include entry.
    fn includes_strict(&self, path: &Path) -> bool {
        self.include.is_empty() || self.include.iter().any(|dir| path.starts_with(dir))
    }

    // Either side may contain the other, so parents of an included
    // directory are still walked.
    fn includes_loose(&self, path: &Path) -> bool {
        self.include.is_empty()
            || self
                .include
                .iter()
                .any(|dir| path.starts_with(dir) || dir.starts_with(path))
    }
}

/// Compile glob patterns. An empty list yields no set (everything matches).
///
/// # Errors
///
/// Returns an error if a pattern is invalid.
pub fn build_glob_set(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| TreeError::InvalidGlob {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;
        builder.add(glob);
    }

    let set = builder.build().map_err(|e| TreeError::InvalidGlob {
        pattern: patterns.join(", "),
        reason: e.to_string(),
    })?;
    Ok(Some(set))
}

//! Tree view: options, filters and filesystem access bundled together.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::Instrument;

use super::filter::PathFilter;
use super::locate;
use super::node::{preorder, TreeNode, TreeResult};
use super::options::TreeOptions;
use super::paths::{self, TreeRoot};
use super::probe::DirCtx;
use crate::observability::spans;
use crate::error::TreeError;
use crate::provider::{FsProvider, LocalFs};
use crate::Result;

/// Builds trees and keeps them in sync with the filesystem.
///
/// A view is cheap to clone and holds no tree itself: the caller owns the
/// [`TreeResult`] and hands it back to [`TreeView::refresh`].
#[derive(Debug, Clone)]
pub struct TreeView {
    pub(crate) options: TreeOptions,
    pub(crate) filter: PathFilter,
    pub(crate) provider: Arc<dyn FsProvider>,
    /// Directory relative paths are resolved against.
    pub(crate) cwd: PathBuf,
}

impl TreeView {
    /// Create a view over the local filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob pattern is invalid or the current
    /// directory cannot be determined.
    pub fn new(options: TreeOptions) -> Result<Self> {
        Self::with_provider(options, Arc::new(LocalFs))
    }

    /// Create a view over a custom provider, resolving relative paths
    /// against the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob pattern is invalid or the current
    /// directory cannot be determined.
    pub fn with_provider(options: TreeOptions, provider: Arc<dyn FsProvider>) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::with_provider_at(options, provider, cwd)
    }

    /// Create a view over a custom provider, resolving relative paths
    /// against `cwd`.
    ///
    /// # Errors
    ///
    /// Returns an error if a glob pattern is invalid.
    pub fn with_provider_at(
        options: TreeOptions,
        provider: Arc<dyn FsProvider>,
        cwd: impl Into<PathBuf>,
    ) -> Result<Self> {
        let cwd = paths::normalize(&cwd.into());
        let filter = PathFilter::new(&cwd, &options.include, &options.exclude, &options.glob)?;
        Ok(Self {
            options,
            filter,
            provider,
            cwd,
        })
    }

    #[must_use]
    pub const fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// Resolve `path` the way the view resolves roots and changed paths.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        paths::resolve(&self.cwd, path)
    }

    pub(crate) fn tree_root(&self, root_path: &Path) -> TreeRoot {
        TreeRoot::new(root_path.to_path_buf(), self.options.relative)
    }

    /// Walk `path` from scratch.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory itself cannot be listed.
    /// Failures further down are recorded on the affected nodes.
    pub async fn process(&self, path: impl AsRef<Path>) -> Result<TreeResult> {
        let root_path = self.resolve(path.as_ref());
        let root = self.tree_root(&root_path);
        let span = spans::walk_span(&root_path);

        async move {
            tracing::info!("Starting tree walk");
            let tree = self.walk(&DirCtx::root(&root)).await?;
            tracing::info!(nodes = preorder(&tree).len(), "Tree walk complete");
            Ok(TreeResult { root_path, tree })
        }
        .instrument(span)
        .await
    }

    /// Node of `result` at `path`, resolved the way changed paths are.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not under the root of `result`.
    pub fn lookup<'r>(&self, result: &'r TreeResult, path: &Path) -> Result<Option<&'r TreeNode>> {
        let root = self.tree_root(&result.root_path);
        let absolute = self.resolve(path);
        let tree_path = root
            .to_tree(&absolute)
            .ok_or_else(|| TreeError::OutsideRoot {
                path: absolute.display().to_string(),
            })?;

        Ok(locate::find(&result.tree, &tree_path)
            .and_then(|location| locate::node_at(&result.tree, &location)))
    }
}

/// One-shot walk of `path` on the local filesystem.
///
/// # Errors
///
/// Returns an error if the options are invalid or `path` cannot be listed.
pub async fn process_tree(path: impl AsRef<Path>, options: TreeOptions) -> Result<Vec<TreeNode>> {
    let view = TreeView::new(options)?;
    Ok(view.process(path).await?.tree)
}

//! Tree reconciler: splice re-probed nodes back into an existing tree.

use std::path::{Path, PathBuf};

use tracing::{debug, Instrument};

use super::locate::{self, find, main_paths, nodes_at, nodes_at_mut, Located};
use super::node::{TreeNode, TreeResult};
use super::options::is_hidden;
use super::paths::TreeRoot;
use super::probe::{DirCtx, Probe};
use super::sort::sort_nodes;
use super::view::TreeView;
use crate::observability::spans;

/// Effect of reconciling one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeChange {
    /// A node that was not in the tree was inserted.
    Add(TreeNode),
    /// An existing node was re-probed and replaced.
    Change(TreeNode),
    /// A node was removed; carries the removed node.
    Unlink(TreeNode),
}

impl TreeChange {
    #[must_use]
    pub const fn node(&self) -> &TreeNode {
        match self {
            Self::Add(node) | Self::Change(node) | Self::Unlink(node) => node,
        }
    }
}

impl TreeView {
    /// Convert changed paths to tree paths, reduce them to main paths and
    /// split them into matches and remains.
    ///
    /// Paths outside the root, and the root itself, are dropped.
    #[must_use]
    pub fn locate(&self, result: &TreeResult, paths: &[PathBuf]) -> Located {
        let root = self.tree_root(&result.root_path);
        let targets: Vec<PathBuf> = paths
            .iter()
            .filter_map(|path| self.target(&root, path))
            .collect();
        locate::locate(&result.tree, main_paths(&targets))
    }

    /// Bring `result` up to date with a batch of changed paths.
    ///
    /// New paths are added shallowest first, then every matched node is
    /// re-probed. Returns one change per affected path, in that order.
    pub async fn refresh(&self, result: &mut TreeResult, paths: &[PathBuf]) -> Vec<TreeChange> {
        let root = self.tree_root(&result.root_path);
        let span = spans::refresh_span(&result.root_path, paths.len());

        async move {
            let Located {
                matches,
                mut remains,
            } = self.locate(result, paths);
            debug!(
                matches = matches.len(),
                remains = remains.len(),
                "Located changed paths"
            );

            let mut changes = Vec::new();

            remains.sort_by_key(|path| path.components().count());
            for pathname in &remains {
                if let Some(change) = self.extend_result(&root, result, pathname).await {
                    changes.push(change);
                }
            }

            for m in &matches {
                if let Some(change) = self.update_match(&root, result, &m.pathname).await {
                    changes.push(change);
                }
            }

            debug!(changes = changes.len(), "Refresh complete");
            changes
        }
        .instrument(span)
        .await
    }

    fn target(&self, root: &TreeRoot, path: &Path) -> Option<PathBuf> {
        let absolute = self.resolve(path);
        let Some(tree_path) = root.to_tree(&absolute) else {
            debug!(path = %absolute.display(), "Ignoring path outside of tree root");
            return None;
        };
        if root.components(&tree_path).is_empty() {
            return None;
        }
        Some(tree_path)
    }

    /// Re-probe the node at `pathname` in place.
    ///
    /// The node is looked up again rather than trusting a stored location,
    /// since additions earlier in the batch may have shifted indices.
    async fn update_match(
        &self,
        root: &TreeRoot,
        result: &mut TreeResult,
        pathname: &Path,
    ) -> Option<TreeChange> {
        let location = find(&result.tree, pathname)?;
        let (&index, parent) = location.split_last()?;
        let (ctx, name) = {
            let node = nodes_at(&result.tree, parent)?.get(index)?;
            (DirCtx::parent_of(root, node.header()), node.name().to_owned())
        };

        let probe = self.probe(&ctx, name.clone()).await;

        let nodes = nodes_at_mut(&mut result.tree, parent)?;
        let position = nodes.iter().position(|node| node.name() == name);
        match (probe, position) {
            (Probe::Found(node), Some(pos)) => {
                nodes[pos] = node.clone();
                sort_nodes(nodes, self.options.sort);
                Some(TreeChange::Change(node))
            }
            (Probe::Found(node), None) => {
                nodes.push(node.clone());
                sort_nodes(nodes, self.options.sort);
                Some(TreeChange::Add(node))
            }
            (Probe::Missing(_) | Probe::Skipped, Some(pos)) => {
                Some(TreeChange::Unlink(nodes.remove(pos)))
            }
            (_, None) => None,
        }
    }

    /// Insert the node for a path the tree has no entry for.
    ///
    /// The path is walked down from the top level; the first component
    /// without a node is probed under the deepest directory found so far.
    async fn extend_result(
        &self,
        root: &TreeRoot,
        result: &mut TreeResult,
        pathname: &Path,
    ) -> Option<TreeChange> {
        let names = root.components(pathname);
        let mut parent = Vec::new();
        let mut ctx = DirCtx::root(root);
        let mut missing = None;
        {
            let mut nodes: &[TreeNode] = &result.tree;
            for (k, component) in names.iter().enumerate() {
                let Some(index) = nodes.iter().position(|node| node.name() == component) else {
                    missing = Some(component.clone());
                    break;
                };
                match &nodes[index] {
                    // An unreadable directory never shows children.
                    TreeNode::Dir(dir) if k + 1 < names.len() && dir.error.is_none() => {
                        parent.push(index);
                        ctx = ctx.child(&dir.header.name);
                        nodes = &dir.nodes;
                    }
                    // Already present (an ancestor added earlier in the batch
                    // covers it) or a non-directory is in the way.
                    _ => return None,
                }
            }
        }

        let name = missing?;
        if !self.options.allows(ctx.depth) || (!self.options.all && is_hidden(&name)) {
            return None;
        }

        let Probe::Found(node) = self.probe(&ctx, name).await else {
            return None;
        };

        let nodes = nodes_at_mut(&mut result.tree, &parent)?;
        let change = match nodes.iter().position(|n| n.name() == node.name()) {
            Some(pos) => {
                nodes[pos] = node.clone();
                TreeChange::Change(node)
            }
            None => {
                nodes.push(node.clone());
                TreeChange::Add(node)
            }
        };
        sort_nodes(nodes, self.options.sort);
        Some(change)
    }
}

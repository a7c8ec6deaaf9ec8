//! Watch session events and change batches.

#![allow(clippy::missing_const_for_fn)]

use std::path::{Path, PathBuf};

use crate::tree::{TreeChange, TreeNode, TreeResult};

/// Event published by a watch session.
///
/// On start every node is announced with `Item`, then `Ready` carries the
/// full tree. Each refresh cycle announces, per affected path, the nodes of
/// any newly probed subtree with `Item` followed by `Add`, `Change` or
/// `Unlink`, and ends with one `Tree`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// A node was probed.
    Item(TreeNode),
    /// The initial walk finished.
    Ready(TreeResult),
    /// A refresh cycle finished.
    Tree(TreeResult),
    /// A node was inserted.
    Add(TreeNode),
    /// A node was re-probed and replaced.
    Change(TreeNode),
    /// A node was removed.
    Unlink(TreeNode),
}

impl TreeEvent {
    /// Short lowercase name of the event.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Item(_) => "item",
            Self::Ready(_) => "ready",
            Self::Tree(_) => "tree",
            Self::Add(_) => "add",
            Self::Change(_) => "change",
            Self::Unlink(_) => "unlink",
        }
    }

    /// Node carried by node-level events.
    #[must_use]
    pub fn node(&self) -> Option<&TreeNode> {
        match self {
            Self::Item(node) | Self::Add(node) | Self::Change(node) | Self::Unlink(node) => {
                Some(node)
            }
            Self::Ready(_) | Self::Tree(_) => None,
        }
    }
}

impl From<TreeChange> for TreeEvent {
    fn from(change: TreeChange) -> Self {
        match change {
            TreeChange::Add(node) => Self::Add(node),
            TreeChange::Change(node) => Self::Change(node),
            TreeChange::Unlink(node) => Self::Unlink(node),
        }
    }
}

/// De-duplicated set of changed paths, in arrival order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeBatch {
    paths: Vec<PathBuf>,
}

impl ChangeBatch {
    /// Create a new empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path unless it is already queued.
    pub fn add(&mut self, path: PathBuf) {
        if !self.paths.contains(&path) {
            self.paths.push(path);
        }
    }

    /// Add every path of `paths`.
    pub fn extend(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        for path in paths {
            self.add(path);
        }
    }

    /// Keep only paths under `root`.
    pub fn retain_under(&mut self, root: &Path) {
        self.paths.retain(|p| p.starts_with(root));
    }

    /// Check if batch is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Get total number of paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Queued paths.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    #[must_use]
    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{ErrorNode, NodeHeader};

    fn node() -> TreeNode {
        TreeNode::Error(ErrorNode {
            header: NodeHeader {
                name: "a".to_string(),
                path: PathBuf::from("/r"),
                pathname: PathBuf::from("/r/a"),
                depth: 0,
            },
            error: "gone".to_string(),
        })
    }

    #[test]
    fn test_event_kind_and_node() {
        let event = TreeEvent::from(TreeChange::Unlink(node()));
        assert_eq!(event.kind(), "unlink");
        assert_eq!(event.node(), Some(&node()));

        let ready = TreeEvent::Ready(TreeResult {
            root_path: PathBuf::from("/r"),
            tree: vec![],
        });
        assert_eq!(ready.kind(), "ready");
        assert!(ready.node().is_none());
    }

    #[test]
    fn test_change_batch_dedups() {
        let mut batch = ChangeBatch::new();
        batch.add(PathBuf::from("/a.rs"));
        batch.add(PathBuf::from("/b.rs"));
        batch.add(PathBuf::from("/a.rs")); // Duplicate

        assert_eq!(batch.len(), 2);
        assert_eq!(
            batch.into_paths(),
            vec![PathBuf::from("/a.rs"), PathBuf::from("/b.rs")]
        );
    }

    #[test]
    fn test_change_batch_retain_under() {
        let mut batch = ChangeBatch::new();
        batch.extend([
            PathBuf::from("/root/x"),
            PathBuf::from("/rootless/y"),
            PathBuf::from("/tmp/z"),
        ]);
        batch.retain_under(Path::new("/root"));
        assert_eq!(batch.paths(), &[PathBuf::from("/root/x")]);
        assert!(!batch.is_empty());
    }
}

//! Tree locator: map changed paths onto an existing tree.

use std::path::{Path, PathBuf};

use super::node::TreeNode;

/// A target path with a node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub pathname: PathBuf,
    /// Child indices from the top level down to the node.
    pub location: Vec<usize>,
}

/// Partition of a path batch into existing nodes and new paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Located {
    /// Targets found in the tree, in tree order.
    pub matches: Vec<Match>,
    /// Targets without a node, in input order.
    pub remains: Vec<PathBuf>,
}

/// Reduce a batch to its main paths: drop duplicates and every path that
/// lies below another path of the batch.
#[must_use]
pub fn main_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut sorted = paths.to_vec();
    sorted.sort();
    sorted.dedup();

    let mut out: Vec<PathBuf> = Vec::with_capacity(sorted.len());
    for path in sorted {
        // Sorting puts every descendant right after an ancestor or after
        // another descendant of it, so checking the last kept path is enough.
        if out.last().map_or(true, |kept| !path.starts_with(kept)) {
            out.push(path);
        }
    }
    out
}

/// Search `tree` for `targets`, which must already be tree paths.
#[must_use]
pub fn locate(tree: &[TreeNode], targets: Vec<PathBuf>) -> Located {
    let mut remaining = targets;
    let mut matches = Vec::new();
    let mut location = Vec::new();
    search(tree, &mut remaining, &mut location, &mut matches);
    Located {
        matches,
        remains: remaining,
    }
}

fn search(
    nodes: &[TreeNode],
    remaining: &mut Vec<PathBuf>,
    location: &mut Vec<usize>,
    matches: &mut Vec<Match>,
) {
    for (index, node) in nodes.iter().enumerate() {
        if remaining.is_empty() {
            return;
        }
        let pathname = node.pathname();
        location.push(index);

        if let Some(pos) = remaining.iter().position(|t| t == pathname) {
            matches.push(Match {
                pathname: remaining.remove(pos),
                location: location.clone(),
            });
        }
        if node.is_dir() && remaining.iter().any(|t| t.starts_with(pathname)) {
            search(node.children(), remaining, location, matches);
        }

        location.pop();
    }
}

/// Location of the node whose pathname is `pathname`.
#[must_use]
pub fn find(tree: &[TreeNode], pathname: &Path) -> Option<Vec<usize>> {
    let mut location = Vec::new();
    let mut nodes = tree;
    loop {
        let (index, node) = nodes
            .iter()
            .enumerate()
            .find(|(_, node)| pathname.starts_with(node.pathname()))?;
        location.push(index);
        if node.pathname() == pathname {
            return Some(location);
        }
        nodes = node.children();
    }
}

/// Node at `location`.
#[must_use]
pub fn node_at<'a>(tree: &'a [TreeNode], location: &[usize]) -> Option<&'a TreeNode> {
    let (&last, parents) = location.split_last()?;
    nodes_at(tree, parents)?.get(last)
}

/// Child list of the directory at `location`; the top level for an empty one.
pub(crate) fn nodes_at<'a>(tree: &'a [TreeNode], location: &[usize]) -> Option<&'a [TreeNode]> {
    let mut nodes = tree;
    for &index in location {
        nodes = &nodes.get(index)?.as_dir()?.nodes;
    }
    Some(nodes)
}

pub(crate) fn nodes_at_mut<'a>(
    tree: &'a mut Vec<TreeNode>,
    location: &[usize],
) -> Option<&'a mut Vec<TreeNode>> {
    let mut nodes = tree;
    for &index in location {
        match nodes.get_mut(index)? {
            TreeNode::Dir(dir) => nodes = &mut dir.nodes,
            _ => return None,
        }
    }
    Some(nodes)
}

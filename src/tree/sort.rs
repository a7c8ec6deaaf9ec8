//! Ordering of sibling nodes.

use std::cmp::Ordering;

use super::node::TreeNode;
use super::options::Sorting;

/// Sort a `nodes` list in place. The sort is stable, so sorting an already
/// sorted list leaves it untouched.
pub fn sort_nodes(nodes: &mut [TreeNode], sorting: Sorting) {
    nodes.sort_by(|a, b| compare(a, b, sorting));
}

/// Check whether a list is already in `sorting` order.
#[must_use]
pub fn is_sorted(nodes: &[TreeNode], sorting: Sorting) -> bool {
    nodes
        .windows(2)
        .all(|pair| compare(&pair[0], &pair[1], sorting) != Ordering::Greater)
}

fn compare(a: &TreeNode, b: &TreeNode, sorting: Sorting) -> Ordering {
    a.has_error()
        .cmp(&b.has_error())
        .then_with(|| rank(a, sorting).cmp(&rank(b, sorting)))
        .then_with(|| a.name().cmp(b.name()))
}

fn rank(node: &TreeNode, sorting: Sorting) -> u8 {
    match (sorting, node.is_dir()) {
        (Sorting::Alpha, _) | (Sorting::FileFirst, false) | (Sorting::DirFirst, true) => 0,
        (Sorting::FileFirst, true) | (Sorting::DirFirst, false) => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::{DirNode, ErrorNode, FileNode, NodeHeader};
    use std::path::PathBuf;

    fn header(name: &str) -> NodeHeader {
        NodeHeader {
            name: name.to_string(),
            path: PathBuf::new(),
            pathname: PathBuf::from(name),
            depth: 0,
        }
    }

    fn file(name: &str) -> TreeNode {
        TreeNode::File(FileNode {
            header: header(name),
            created: None,
            modified: None,
            size: 0,
            ext: String::new(),
            binary: false,
            content: None,
            error: None,
        })
    }

    fn dir(name: &str) -> TreeNode {
        TreeNode::Dir(DirNode {
            header: header(name),
            created: None,
            modified: None,
            nodes: Vec::new(),
            error: None,
        })
    }

    fn broken(name: &str) -> TreeNode {
        TreeNode::Error(ErrorNode {
            header: header(name),
            error: "boom".to_string(),
        })
    }

    fn names(nodes: &[TreeNode]) -> Vec<&str> {
        nodes.iter().map(TreeNode::name).collect()
    }

    fn sample() -> Vec<TreeNode> {
        vec![dir("d2"), broken("a0"), file("f2"), dir("d1"), file("f1")]
    }

    #[test]
    fn test_alpha() {
        let mut nodes = sample();
        sort_nodes(&mut nodes, Sorting::Alpha);
        assert_eq!(names(&nodes), vec!["d1", "d2", "f1", "f2", "a0"]);
    }

    #[test]
    fn test_file_first() {
        let mut nodes = sample();
        sort_nodes(&mut nodes, Sorting::FileFirst);
        assert_eq!(names(&nodes), vec!["f1", "f2", "d1", "d2", "a0"]);
    }

    #[test]
    fn test_dir_first() {
        let mut nodes = sample();
        sort_nodes(&mut nodes, Sorting::DirFirst);
        assert_eq!(names(&nodes), vec!["d1", "d2", "f1", "f2", "a0"]);
    }

    #[test]
    fn test_resort_is_noop() {
        for sorting in [Sorting::Alpha, Sorting::FileFirst, Sorting::DirFirst] {
            let mut nodes = sample();
            sort_nodes(&mut nodes, sorting);
            assert!(is_sorted(&nodes, sorting));
            let once = nodes.clone();
            sort_nodes(&mut nodes, sorting);
            assert_eq!(nodes, once);
        }
    }

    #[test]
    fn test_errors_last_even_on_dirs() {
        let mut failing = dir("a");
        if let TreeNode::Dir(d) = &mut failing {
            d.error = Some("unreadable".to_string());
        }
        let mut nodes = vec![failing, file("z")];
        sort_nodes(&mut nodes, Sorting::DirFirst);
        assert_eq!(names(&nodes), vec!["z", "a"]);
    }
}

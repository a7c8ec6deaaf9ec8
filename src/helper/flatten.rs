use crate::tree::{preorder, TreeNode};

/// Every non-directory node of the tree, ordered by `path` then `name`.
#[must_use]
pub fn flatten(tree: &[TreeNode]) -> Vec<&TreeNode> {
    let mut out: Vec<&TreeNode> = preorder(tree)
        .into_iter()
        .filter(|node| !node.is_dir())
        .collect();
    out.sort_by(|a, b| a.path().cmp(b.path()).then_with(|| a.name().cmp(b.name())));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::fixtures::sample;
    use std::path::Path;

    #[test]
    fn test_flatten_keeps_leaves_only() {
        let tree = sample();
        let flat: Vec<&Path> = flatten(&tree).iter().map(|n| n.pathname()).collect();
        assert_eq!(
            flat,
            vec![
                Path::new("/r/a"),
                Path::new("/r/z"),
                Path::new("/r/sub/b.txt"),
                Path::new("/r/sub/deep/c"),
            ]
        );
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten(&[]).is_empty());
    }
}

use crate::tree::TreeNode;

/// Copy of the tree without directories that hold no file at any depth.
#[must_use]
pub fn clean(tree: &[TreeNode]) -> Vec<TreeNode> {
    tree.iter()
        .filter_map(|node| match node {
            TreeNode::Dir(dir) => {
                let nodes = clean(&dir.nodes);
                if nodes.is_empty() {
                    return None;
                }
                let mut dir = dir.clone();
                dir.nodes = nodes;
                Some(TreeNode::Dir(dir))
            }
            other => Some(other.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::fixtures::{dir, sample};

    #[test]
    fn test_clean_drops_empty_branches() {
        let cleaned = clean(&sample());
        let names: Vec<&str> = cleaned.iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["a", "sub", "z"]);
        assert_eq!(cleaned[1].children().len(), 2);
    }

    #[test]
    fn test_clean_only_dirs() {
        let tree = vec![dir("/r", "x", 0, vec![dir("/r/x", "y", 1, vec![])])];
        assert!(clean(&tree).is_empty());
    }
}

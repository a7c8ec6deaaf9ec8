//! Output helpers applied to a finished tree.

mod clean;
mod flatten;
mod pretty;

pub use clean::clean;
pub use flatten::flatten;
pub use pretty::pretty;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::{Path, PathBuf};

    use crate::tree::{DirNode, FileNode, NodeHeader, TreeNode};

    fn header(path: &str, name: &str, depth: usize) -> NodeHeader {
        NodeHeader {
            name: name.to_string(),
            path: PathBuf::from(path),
            pathname: Path::new(path).join(name),
            depth,
        }
    }

    pub fn file(path: &str, name: &str, depth: usize) -> TreeNode {
        TreeNode::File(FileNode {
            header: header(path, name, depth),
            created: None,
            modified: None,
            size: 1,
            ext: String::new(),
            binary: false,
            content: None,
            error: None,
        })
    }

    pub fn dir(path: &str, name: &str, depth: usize, nodes: Vec<TreeNode>) -> TreeNode {
        TreeNode::Dir(DirNode {
            header: header(path, name, depth),
            created: None,
            modified: None,
            nodes,
            error: None,
        })
    }

    // /r/a, /r/sub/{b.txt, deep/{c}}, /r/void/{empty/}, /r/z
    pub fn sample() -> Vec<TreeNode> {
        vec![
            file("/r", "a", 0),
            dir(
                "/r",
                "sub",
                0,
                vec![
                    file("/r/sub", "b.txt", 1),
                    dir("/r/sub", "deep", 1, vec![file("/r/sub/deep", "c", 2)]),
                ],
            ),
            dir(
                "/r",
                "void",
                0,
                vec![dir("/r/void", "empty", 1, vec![])],
            ),
            file("/r", "z", 0),
        ]
    }
}

//! Tree node model.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Fields shared by every node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeHeader {
    /// Base name of the resource.
    pub name: String,
    /// Parent directory, absolute or relative to the root.
    pub path: PathBuf,
    /// `path` joined with `name`. Unique within a tree.
    pub pathname: PathBuf,
    /// Distance from the scan root; top-level nodes are at depth 0.
    pub depth: usize,
}

/// A regular file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    #[serde(flatten)]
    pub header: NodeHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    pub size: u64,
    /// Lowercased extension without the dot, empty when there is none.
    pub ext: String,
    pub binary: bool,
    /// Base64 for binary files, UTF-8 text otherwise. Only set when content
    /// inclusion is enabled; forced to an empty string on read failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A directory and its (possibly unexpanded) children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirNode {
    #[serde(flatten)]
    pub header: NodeHeader,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
    pub nodes: Vec<TreeNode>,
    /// Set when the directory could not be expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A resource that could not be stat-ed. Always a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorNode {
    #[serde(flatten)]
    pub header: NodeHeader,
    pub error: String,
}

/// One entry of a tree.
///
/// Files and directories serialize with a `type` tag; error leaves carry no
/// `type`, only the header fields and `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    File(FileNode),
    Dir(DirNode),
    Error(ErrorNode),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Tagged<'a> {
    File(&'a FileNode),
    Dir(&'a DirNode),
}

impl Serialize for TreeNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::File(file) => Tagged::File(file).serialize(serializer),
            Self::Dir(dir) => Tagged::Dir(dir).serialize(serializer),
            Self::Error(err) => err.serialize(serializer),
        }
    }
}

impl TreeNode {
    #[must_use]
    pub const fn header(&self) -> &NodeHeader {
        match self {
            Self::File(file) => &file.header,
            Self::Dir(dir) => &dir.header,
            Self::Error(err) => &err.header,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.header().name
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.header().path
    }

    #[must_use]
    pub fn pathname(&self) -> &Path {
        &self.header().pathname
    }

    #[must_use]
    pub const fn depth(&self) -> usize {
        self.header().depth
    }

    /// Error message attached to the node, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::File(file) => file.error.as_deref(),
            Self::Dir(dir) => dir.error.as_deref(),
            Self::Error(err) => Some(&err.error),
        }
    }

    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error().is_some()
    }

    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self, Self::Dir(_))
    }

    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    #[must_use]
    pub const fn as_dir(&self) -> Option<&DirNode> {
        match self {
            Self::Dir(dir) => Some(dir),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_file(&self) -> Option<&FileNode> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    /// Child nodes; empty for anything but a directory.
    #[must_use]
    pub fn children(&self) -> &[TreeNode] {
        match self {
            Self::Dir(dir) => &dir.nodes,
            _ => &[],
        }
    }

    /// Visit this node and all of its descendants, parents first.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a TreeNode)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }
}

/// All nodes of `nodes` and their descendants, parents first.
#[must_use]
pub fn preorder(nodes: &[TreeNode]) -> Vec<&TreeNode> {
    let mut out = Vec::new();
    for node in nodes {
        node.visit(&mut |n| out.push(n));
    }
    out
}

/// A tree together with the root it was computed from.
///
/// The same value is mutated in place across refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeResult {
    /// Absolute root of the scan.
    pub root_path: PathBuf,
    /// Top-level nodes.
    pub tree: Vec<TreeNode>,
}

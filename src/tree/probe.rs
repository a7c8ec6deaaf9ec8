//! Node prober: stat, classify, filter and optionally read one resource.

use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::future::{BoxFuture, FutureExt};
use tracing::debug;

use super::binary;
use super::node::{DirNode, ErrorNode, FileNode, NodeHeader, TreeNode};
use super::paths::TreeRoot;
use super::view::TreeView;
use crate::provider::{EntryKind, Stats};

/// Directory a probe runs in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DirCtx {
    /// Absolute path of the directory.
    pub abs: PathBuf,
    /// The directory as a tree path; becomes `path` of its children.
    pub path: PathBuf,
    /// Depth given to its children.
    pub depth: usize,
}

impl DirCtx {
    pub fn root(root: &TreeRoot) -> Self {
        Self {
            abs: root.absolute().to_path_buf(),
            path: root.tree_path(),
            depth: 0,
        }
    }

    /// Context of the directory holding the node described by `header`.
    pub fn parent_of(root: &TreeRoot, header: &NodeHeader) -> Self {
        Self {
            abs: root.to_absolute(&header.path),
            path: header.path.clone(),
            depth: header.depth,
        }
    }

    /// Context of the child directory `name`.
    pub fn child(&self, name: &str) -> Self {
        Self {
            abs: self.abs.join(name),
            path: self.path.join(name),
            depth: self.depth + 1,
        }
    }
}

/// Outcome of probing one name.
#[derive(Debug)]
pub(crate) enum Probe {
    /// Accepted node, possibly an error leaf for a resource that could not
    /// be stat-ed for a reason other than being absent.
    Found(TreeNode),
    /// The resource does not exist; carries the error leaf a walk keeps.
    Missing(TreeNode),
    /// Rejected by a filter or neither file nor directory.
    Skipped,
}

impl Probe {
    /// Node a walk keeps for this outcome.
    pub fn into_node(self) -> Option<TreeNode> {
        match self {
            Self::Found(node) | Self::Missing(node) => Some(node),
            Self::Skipped => None,
        }
    }
}

impl TreeView {
    /// Probe `name` inside `ctx`, expanding accepted directories.
    pub(crate) fn probe<'a>(&'a self, ctx: &'a DirCtx, name: String) -> BoxFuture<'a, Probe> {
        async move {
            let abs = ctx.abs.join(&name);
            let header = NodeHeader {
                pathname: ctx.path.join(&name),
                path: ctx.path.clone(),
                name,
                depth: ctx.depth,
            };

            let stats = match self.provider.stat(&abs).await {
                Ok(stats) => stats,
                Err(e) => {
                    debug!(path = %abs.display(), error = %e, "Stat failed");
                    let missing = e.kind() == io::ErrorKind::NotFound;
                    let node = TreeNode::Error(ErrorNode {
                        header,
                        error: e.to_string(),
                    });
                    return if missing {
                        Probe::Missing(node)
                    } else {
                        Probe::Found(node)
                    };
                }
            };

            match stats.kind {
                EntryKind::File if self.filter.accepts_file(&header.pathname, &ctx.abs) => {
                    Probe::Found(self.file_node(header, &abs, &stats).await)
                }
                EntryKind::Dir if self.filter.accepts_dir(&abs) => {
                    Probe::Found(self.dir_node(ctx, header, &stats).await)
                }
                _ => Probe::Skipped,
            }
        }
        .boxed()
    }

    async fn file_node(&self, header: NodeHeader, abs: &Path, stats: &Stats) -> TreeNode {
        let ext = binary::extension(&header.name);
        let binary = binary::is_binary_ext(&ext);
        let mut file = FileNode {
            header,
            created: stats.created,
            modified: stats.modified,
            size: stats.size,
            ext,
            binary,
            content: None,
            error: None,
        };

        if self.options.content {
            match self.provider.read_file(abs).await {
                Ok(bytes) => file.content = Some(encode_content(&bytes, binary)),
                Err(e) => {
                    debug!(path = %abs.display(), error = %e, "Read failed");
                    file.error = Some(e.to_string());
                    file.content = Some(String::new());
                }
            }
        }

        TreeNode::File(file)
    }

    async fn dir_node(&self, ctx: &DirCtx, header: NodeHeader, stats: &Stats) -> TreeNode {
        let mut dir = DirNode {
            header,
            created: stats.created,
            modified: stats.modified,
            nodes: Vec::new(),
            error: None,
        };

        if self.options.expands(dir.header.depth) {
            let child = ctx.child(&dir.header.name);
            match self.walk(&child).await {
                Ok(nodes) => dir.nodes = nodes,
                Err(e) => {
                    debug!(path = %child.abs.display(), error = %e, "Expansion failed");
                    dir.error = Some(e.to_string());
                }
            }
        }

        TreeNode::Dir(dir)
    }
}

fn encode_content(bytes: &[u8], binary: bool) -> String {
    if binary {
        STANDARD.encode(bytes)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

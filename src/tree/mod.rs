//! Filesystem tree model and the incremental synchronization engine.
//!
//! A [`TreeView`] walks a directory into a [`TreeResult`] and later
//! reconciles that same result with batches of changed paths:
//! - `probe` stats and classifies a single resource
//! - `walker` expands a directory with concurrent probes
//! - `locate` maps changed paths onto existing nodes
//! - `reconcile` re-probes matches and inserts new paths

pub mod binary;
pub mod filter;
pub mod locate;
pub mod node;
pub mod options;
pub mod paths;
mod probe;
mod reconcile;
pub mod sort;
mod view;
mod walker;

pub use locate::{main_paths, Located, Match};
pub use node::{preorder, DirNode, ErrorNode, FileNode, NodeHeader, TreeNode, TreeResult};
pub use options::{Sorting, TreeOptions};
pub use reconcile::TreeChange;
pub use view::{process_tree, TreeView};

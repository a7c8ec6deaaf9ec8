//! Tree walker: expand one directory into sorted child nodes.

use futures::future::{join_all, BoxFuture, FutureExt};
use tracing::trace;

use super::node::TreeNode;
use super::options::is_hidden;
use super::probe::{DirCtx, Probe};
use super::sort::sort_nodes;
use super::view::TreeView;
use crate::error::TreeError;

impl TreeView {
    /// List `ctx`, probe every visible entry concurrently and sort the result.
    ///
    /// Listing failure is the only error returned; everything below it is
    /// recorded on the nodes.
    pub(crate) fn walk<'a>(
        &'a self,
        ctx: &'a DirCtx,
    ) -> BoxFuture<'a, std::result::Result<Vec<TreeNode>, TreeError>> {
        async move {
            let names = self
                .provider
                .read_dir(&ctx.abs)
                .await
                .map_err(|e| TreeError::read_dir(&ctx.abs, e))?;

            let probes = names
                .into_iter()
                .filter(|name| self.options.all || !is_hidden(name))
                .map(|name| self.probe(ctx, name));

            let mut nodes: Vec<TreeNode> = join_all(probes)
                .await
                .into_iter()
                .filter_map(Probe::into_node)
                .collect();
            sort_nodes(&mut nodes, self.options.sort);

            trace!(path = %ctx.abs.display(), nodes = nodes.len(), "Walked directory");
            Ok(nodes)
        }
        .boxed()
    }
}

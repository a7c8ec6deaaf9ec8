//! Watch session: cold walk, then serialized refresh cycles.
//!
//! The tree is owned by a single task. Changed paths that arrive while a
//! refresh is running queue up in the change source and are merged into
//! the next cycle, so two refreshes never touch the tree at once.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, Instrument};

use super::events::{ChangeBatch, TreeEvent};
use super::source::ChangeSource;
use super::stats::{SessionStats, SessionStatsSnapshot};
use super::watcher::FileWatcher;
use crate::observability::spans;
use crate::provider::LocalFs;
use crate::tree::paths;
use crate::tree::{preorder, TreeChange, TreeNode, TreeOptions, TreeResult, TreeView};
use crate::{Error, Result};

/// Capacity of the event channel handed to the session's consumer.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Handle to a running watch session.
#[derive(Debug)]
pub struct WatchSession {
    root: PathBuf,
    events: mpsc::Receiver<TreeEvent>,
    stats: Arc<SessionStats>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl WatchSession {
    /// Walk `path` and start reconciling it with batches from `source`.
    ///
    /// `source` should already be subscribed, so that changes made during
    /// the initial walk are not lost.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be listed.
    pub async fn start<S: ChangeSource>(
        view: TreeView,
        path: impl AsRef<Path>,
        source: S,
    ) -> Result<Self> {
        let result = view.process(path).await?;
        let root = result.root_path.clone();

        let (events_tx, events) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let stats = SessionStats::new();
        let cancel = CancellationToken::new();

        let actor = SessionActor {
            view,
            result,
            source,
            emitter: Emitter {
                events: events_tx,
                stats: Arc::clone(&stats),
                cancel: cancel.clone(),
            },
        };
        let handle = tokio::spawn(actor.run().instrument(spans::session_span(&root)));

        Ok(Self {
            root,
            events,
            stats,
            cancel,
            handle,
        })
    }

    /// Absolute root of the watched tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Next event, or `None` once the session has stopped.
    pub async fn recv(&mut self) -> Option<TreeEvent> {
        self.events.recv().await
    }

    #[must_use]
    pub fn stats(&self) -> SessionStatsSnapshot {
        self.stats.snapshot()
    }

    /// Stop the session. A refresh already running is allowed to finish,
    /// but no further events are delivered.
    ///
    /// # Errors
    ///
    /// Returns an error if the session task panicked.
    pub async fn close(self) -> Result<()> {
        let Self {
            events,
            cancel,
            handle,
            ..
        } = self;

        cancel.cancel();
        drop(events);
        handle
            .await
            .map_err(|e| Error::internal(format!("watch session task failed: {e}")))
    }
}

/// Watch `path` on the local filesystem.
///
/// The root is canonicalized first, since the platform watcher reports
/// canonical paths. Include and exclude entries are canonicalized too so
/// they still match when the root is reached through a symlink; entries
/// that do not exist are resolved lexically.
///
/// # Errors
///
/// Returns an error if the options are invalid, or if the root cannot be
/// resolved, watched or listed.
pub async fn watch_tree(
    path: impl AsRef<Path>,
    mut options: TreeOptions,
    debounce: Duration,
) -> Result<WatchSession> {
    let cwd = std::env::current_dir()?;
    let root = tokio::fs::canonicalize(paths::resolve(&cwd, path.as_ref())).await?;
    options.include = canonicalize_all(&cwd, &options.include).await;
    options.exclude = canonicalize_all(&cwd, &options.exclude).await;

    let view = TreeView::with_provider_at(options, Arc::new(LocalFs), cwd)?;
    let watcher = FileWatcher::new(&root, debounce)?;
    WatchSession::start(view, root, watcher).await
}

async fn canonicalize_all(base: &Path, entries: &[PathBuf]) -> Vec<PathBuf> {
    let mut resolved = Vec::with_capacity(entries.len());
    for entry in entries {
        let lexical = paths::resolve(base, entry);
        resolved.push(tokio::fs::canonicalize(&lexical).await.unwrap_or(lexical));
    }
    resolved
}

struct SessionActor<S> {
    view: TreeView,
    result: TreeResult,
    source: S,
    emitter: Emitter,
}

impl<S: ChangeSource> SessionActor<S> {
    async fn run(mut self) {
        if self.emitter.announce(&self.result.tree).await
            && self.emitter.emit(TreeEvent::Ready(self.result.clone())).await
        {
            info!("Watch session ready");
            self.serve().await;
        }
        debug!("Watch session stopped");
    }

    async fn serve(&mut self) {
        loop {
            let batch = tokio::select! {
                biased;
                () = self.emitter.cancel.cancelled() => return,
                batch = self.source.next_batch() => match batch {
                    Some(batch) => batch,
                    None => return,
                },
            };

            let mut pending = ChangeBatch::new();
            pending.extend(batch);
            while let Some(more) = self.source.try_next_batch() {
                pending.extend(more);
            }

            if !self.reconcile(pending.into_paths()).await {
                return;
            }
        }
    }

    /// Run one refresh cycle. Returns false once events can no longer be
    /// delivered.
    async fn reconcile(&mut self, paths: Vec<PathBuf>) -> bool {
        let emitter = &self.emitter;
        emitter.stats.record_batch(paths.len());
        let changes = self.view.refresh(&mut self.result, &paths).await;
        debug!(paths = paths.len(), changes = changes.len(), "Refresh cycle");

        for change in changes {
            emitter.stats.record_change(&change);
            if let TreeChange::Add(node) | TreeChange::Change(node) = &change {
                if !emitter.announce(std::slice::from_ref(node)).await {
                    return false;
                }
            }
            if !emitter.emit(change.into()).await {
                return false;
            }
        }

        emitter.emit(TreeEvent::Tree(self.result.clone())).await
    }
}

/// Outgoing side of a session. Kept apart from the change source so the
/// actor future does not need the source to be `Sync`.
struct Emitter {
    events: mpsc::Sender<TreeEvent>,
    stats: Arc<SessionStats>,
    cancel: CancellationToken,
}

impl Emitter {
    /// Emit `Item` for every node of `nodes`, parents first.
    async fn announce(&self, nodes: &[TreeNode]) -> bool {
        for node in preorder(nodes) {
            if !self.emit(TreeEvent::Item(node.clone())).await {
                return false;
            }
        }
        true
    }

    async fn emit(&self, event: TreeEvent) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        self.stats.record_event();
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => false,
            sent = self.events.send(event) => sent.is_ok(),
        }
    }
}

//! Structured logging and tracing configuration.
//!
//! Provides setup for observability using the `tracing` crate with:
//! - Structured logging with JSON output option
//! - Configurable log levels, overridable through `RUST_LOG`
//! - Span helpers for walks and refreshes

use std::path::Path;

use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Registry,
};

/// Initialize tracing with the given level and format.
///
/// Logs go to stderr so they never mix with tree output on stdout.
/// Calling it a second time in the same process is a no-op.
pub fn init_tracing(level: &str, json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let result = if json {
        let json_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        Registry::default().with(env_filter).with(json_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true);

        Registry::default().with(env_filter).with(fmt_layer).try_init()
    };

    if result.is_ok() {
        tracing::debug!("Tracing initialized: level={}, json={}", level, json);
    }
}

/// Span constructors shared by the tree engine and the watcher.
pub mod spans {
    use super::Path;
    use tracing::{debug_span, info_span, Span};

    /// Span covering a cold walk of `root`.
    #[must_use]
    pub fn walk_span(root: &Path) -> Span {
        info_span!("walk", root = %root.display())
    }

    /// Span covering one refresh of a tree rooted at `root`.
    #[must_use]
    pub fn refresh_span(root: &Path, paths: usize) -> Span {
        debug_span!("refresh", root = %root.display(), paths = paths)
    }

    /// Span covering the lifetime of a watch session.
    #[must_use]
    pub fn session_span(root: &Path) -> Span {
        info_span!("watch_session", root = %root.display())
    }
}

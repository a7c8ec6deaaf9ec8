//! treeview - filesystem tree snapshots
//!
//! Entry point for the `treeview` command.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::struct_excessive_bools)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use treeview::observability::init_tracing;
use treeview::{helper, watch_tree, Config, Sorting, TreeEvent, TreeOptions, TreeResult, TreeView};

/// Print a directory tree as JSON, optionally following live changes.
#[derive(Parser, Debug)]
#[command(name = "treeview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to scan
    path: PathBuf,

    /// Include hidden files and directories
    #[arg(short, long, env = "TREEVIEW_ALL")]
    all: bool,

    /// Add file contents to the output
    #[arg(short, long, env = "TREEVIEW_CONTENT")]
    content: bool,

    /// Maximum depth of directories to expand
    #[arg(short, long, env = "TREEVIEW_DEPTH")]
    depth: Option<usize>,

    /// Use paths relative to the scanned directory
    #[arg(short, long, env = "TREEVIEW_RELATIVE")]
    relative: bool,

    /// Directory paths to include
    #[arg(short, long, env = "TREEVIEW_INCLUDE", value_delimiter = ',')]
    include: Vec<PathBuf>,

    /// Directory paths to exclude
    #[arg(short, long, env = "TREEVIEW_EXCLUDE", value_delimiter = ',')]
    exclude: Vec<PathBuf>,

    /// Glob patterns files must match
    #[arg(short, long, env = "TREEVIEW_GLOB", value_delimiter = ',')]
    glob: Vec<String>,

    /// Ordering of sibling entries
    #[arg(long, env = "TREEVIEW_SORT", value_enum, default_value = "alpha")]
    sort: Sorting,

    /// Drop directories that contain no files
    #[arg(short = 'n', long)]
    clean: bool,

    /// Output a flat list of files
    #[arg(short, long)]
    flatten: bool,

    /// Output an indented text tree instead of JSON
    #[arg(short, long)]
    pretty: bool,

    /// Keep running and follow filesystem changes
    #[arg(short, long, env = "TREEVIEW_WATCH")]
    watch: bool,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Wrap the output with the options used to produce it
    #[arg(long)]
    debug: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TREEVIEW_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, env = "TREEVIEW_LOG_JSON")]
    log_json: bool,

    /// Debounce for filesystem events in watch mode, in milliseconds
    #[arg(long, env = "TREEVIEW_DEBOUNCE_MS", default_value = "100")]
    debounce_ms: u64,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            root: self.path.clone(),
            tree: TreeOptions {
                all: self.all,
                content: self.content,
                depth: self.depth,
                relative: self.relative,
                include: self.include.clone(),
                exclude: self.exclude.clone(),
                glob: self.glob.clone(),
                sort: self.sort,
            },
            log_level: self.log_level.clone(),
            log_json: self.log_json,
            debounce: Duration::from_millis(self.debounce_ms),
            watch: self.watch,
        }
    }

    fn render(&self, config: &Config, result: &TreeResult) -> anyhow::Result<String> {
        let tree = if self.clean {
            helper::clean(&result.tree)
        } else {
            result.tree.clone()
        };

        if self.pretty {
            return Ok(helper::pretty(&tree));
        }

        let output = if self.flatten {
            serde_json::to_value(helper::flatten(&tree))?
        } else {
            serde_json::to_value(&tree)?
        };

        let document = if self.debug {
            json!({
                "options": {
                    "tree": config.tree,
                    "clean": self.clean,
                    "flatten": self.flatten,
                    "watch": config.watch,
                },
                "path": result.root_path,
                "output": output,
            })
        } else {
            output
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }

    async fn write(&self, text: &str) -> anyhow::Result<()> {
        match &self.output {
            Some(path) => tokio::fs::write(path, format!("{text}\n"))
                .await
                .with_context(|| format!("failed to write output to {}", path.display())),
            None => {
                println!("{text}");
                Ok(())
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config();

    init_tracing(&config.log_level, config.log_json);
    tracing::debug!(?config, "Configuration loaded");

    config.validate()?;

    if config.watch {
        watch(&cli, &config).await
    } else {
        let view = TreeView::new(config.tree.clone())?;
        let result = view
            .process(&config.root)
            .await
            .with_context(|| format!("failed to scan {}", config.root.display()))?;
        cli.write(&cli.render(&config, &result)?).await
    }
}

async fn watch(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let mut session = watch_tree(&config.root, config.tree.clone(), config.debounce)
        .await
        .with_context(|| format!("failed to watch {}", config.root.display()))?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            event = session.recv() => match event {
                Some(TreeEvent::Ready(result) | TreeEvent::Tree(result)) => {
                    cli.write(&cli.render(config, &result)?).await?;
                }
                Some(event @ (TreeEvent::Add(_) | TreeEvent::Change(_) | TreeEvent::Unlink(_))) => {
                    if let Some(node) = event.node() {
                        eprintln!("{} {}", event.kind(), node.pathname().display());
                    }
                }
                Some(TreeEvent::Item(_)) => {}
                None => break,
            },
        }
    }

    let stats = session.stats();
    tracing::info!(
        batches = stats.batches,
        added = stats.added,
        changed = stats.changed,
        unlinked = stats.unlinked,
        "Watch stopped"
    );
    session.close().await?;
    Ok(())
}

//! Configuration management for treeview.
//!
//! Supports configuration from:
//! - Command-line arguments (highest priority)
//! - Environment variables (`TREEVIEW_*`)
//! - Built-in defaults (lowest priority)

mod settings;

pub use settings::Config;

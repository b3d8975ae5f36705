#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::indexing_slicing)] // Bounds checked by logic

//! # antwalk - Ant-style file selection
//!
//! antwalk enumerates the files and directories under a root that match
//! Ant-style include and exclude patterns, visiting them in breadth-first
//! order and pruning directories the patterns rule out.
//!
//! ## Pattern syntax
//!
//! - `?` matches exactly one character within a path segment
//! - `*` matches zero or more characters within a path segment
//! - `**` matches zero or more whole segments
//! - a trailing `/` is shorthand for `/**`
//!
//! ## Architecture
//!
//! - [`relative_path`]: the root-relative path value that patterns match
//! - [`pattern`]: pattern compilation and matching
//! - [`walker`]: the breadth-first walker and the visitor it notifies
//! - [`config`]: configuration parsing and validation
//! - [`commands`]: CLI command implementations
//! - [`output`]: colored, verbosity-aware messages
//! - [`utils`]: path helpers and the worker pool
//!
//! ## Example Usage
//!
//! ```no_run
//! use antwalk::walker::{BreadthFirstDirectoryWalker, DirectoryWalker, SelectionCollector};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut walker = BreadthFirstDirectoryWalker::new(true, SelectionCollector::new());
//! walker.set_includes(&["src/**"])?;
//! walker.set_excludes(&["**/test/**"])?;
//! walker.start(Path::new("project"))?;
//!
//! for path in walker.visitor().files() {
//!     println!("{path}");
//! }
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// CLI command implementations.
pub mod commands;

/// Configuration parsing, validation, and management.
pub mod config;

/// Output formatting for the CLI.
pub mod output;

/// Ant-style pattern compilation and matching.
pub mod pattern;

/// Root-relative paths.
pub mod relative_path;

/// Utility functions and helpers.
pub mod utils;

/// Pattern-filtered directory traversal.
pub mod walker;

pub use pattern::{MatcherKind, PatternError, PatternMatcher, PatternMatcherFactory};
pub use relative_path::RelativePath;
pub use walker::{
    BreadthFirstDirectoryWalker, DirectoryWalker, FileVisitor, UnreadablePolicy, WalkError,
    WalkOptions, WalkSummary,
};

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the antwalk binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/antwalk/config.toml";

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "ANTWALK_CONFIG_PATH";

/// Loaded configuration plus where it came from.
///
/// # Examples
///
/// ```no_run
/// use antwalk::AntwalkContext;
///
/// # fn main() -> anyhow::Result<()> {
/// // Default location, honoring ANTWALK_CONFIG_PATH
/// let ctx = AntwalkContext::new()?;
///
/// // Explicit location (for testing)
/// let ctx = AntwalkContext::new_explicit("/tmp/antwalk/config.toml".into())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AntwalkContext {
    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl AntwalkContext {
    /// Load the configuration from `ANTWALK_CONFIG_PATH` or the default
    /// path, warn about unknown keys and size the worker pool.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or if the
    /// configuration file cannot be read, created or validated.
    pub fn new() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            PathBuf::from(path)
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        let context = Self::new_explicit(config_path)?;

        let validator = config::validator::ConfigValidator::new();
        if let Err(e) = validator.validate_config_file(&context.config_path) {
            output::warning(&format!("Configuration validation failed: {e}"));
        }

        if let Err(e) = utils::thread_pool::configure_from_config(&context.config) {
            output::warning(&format!("Failed to configure thread pool: {e}"));
        }

        Ok(context)
    }

    /// Load the configuration from an explicit path, creating it with
    /// defaults if missing. Leaves the worker pool untouched.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(config_path: PathBuf) -> Result<Self> {
        let config = config::Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        Ok(Self {
            config_path,
            config,
        })
    }
}

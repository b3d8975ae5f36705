//! Command-line interface definitions for antwalk.
//!
//! The definitions are shared between the main binary and xtask, which
//! renders man pages from them.
//!
//! Field-level documentation lives in the clap help text, so missing docs
//! are allowed here.

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for antwalk.
#[derive(Parser)]
#[command(
    name = "antwalk",
    version = crate::VERSION,
    about = "Select files with Ant-style include/exclude patterns",
    long_about = "Walks directory trees breadth-first and prints the files and directories \
                  admitted by Ant-style patterns (?, *, **)"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show walk statistics and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the entries under one or more roots that the patterns admit
    Select(SelectArgs),

    /// Test a single pattern against paths without touching the filesystem
    Match {
        /// Pattern to compile
        pattern: String,

        /// Relative paths to test
        #[arg(required = true)]
        paths: Vec<String>,

        /// Compile as an exclude pattern (no directory prefix matches)
        #[arg(long)]
        exclude: bool,

        /// Compare case-insensitively
        #[arg(long)]
        ignore_case: bool,

        /// Treat the paths as directories instead of files
        #[arg(long)]
        dir: bool,
    },

    /// Get and set configuration options
    Config {
        /// Configuration key (e.g., walk.sort_entries, sets.java.includes)
        key: Option<String>,

        /// Value to set (omit to get current value)
        value: Option<String>,

        /// Remove the key (or a whole `sets.<name>`)
        #[arg(long, conflicts_with = "value")]
        unset: bool,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments of `antwalk select`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SelectArgs {
    /// Directories (or files) to walk
    #[arg(required = true)]
    pub roots: Vec<PathBuf>,

    /// Include pattern (repeatable)
    #[arg(short = 'i', long = "include", value_name = "PATTERN")]
    pub includes: Vec<String>,

    /// Exclude pattern (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    pub excludes: Vec<String>,

    /// Start from a pattern set defined in the config file
    #[arg(long, value_name = "NAME")]
    pub set: Option<String>,

    /// Compare names case-insensitively
    #[arg(long)]
    pub ignore_case: bool,

    /// Do not apply the default excludes (.git, .svn, editor backups, ...)
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Sort entries by name within each directory
    #[arg(long, overrides_with = "no_sort")]
    pub sort: bool,

    /// Keep filesystem order within each directory
    #[arg(long, overrides_with = "sort")]
    pub no_sort: bool,

    /// Print only files
    #[arg(long, conflicts_with = "dirs_only")]
    pub files_only: bool,

    /// Print only directories
    #[arg(long)]
    pub dirs_only: bool,

    /// Print absolute locations instead of root-relative paths
    #[arg(long)]
    pub absolute: bool,

    /// Separate entries with NUL instead of newline
    #[arg(short = '0', long = "null")]
    pub null: bool,

    /// Fail instead of skipping directories that cannot be read
    #[arg(long)]
    pub fail_on_unreadable: bool,
}

impl SelectArgs {
    /// The sort flag pair resolved to a value, if either was given.
    #[must_use]
    pub const fn sort_override(&self) -> Option<bool> {
        if self.sort {
            Some(true)
        } else if self.no_sort {
            Some(false)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_select() {
        let cli = Cli::parse_from([
            "antwalk", "select", "a", "b", "-i", "src/**", "-e", "**/test/**", "--no-sort", "-0",
        ]);
        let Commands::Select(args) = cli.command else {
            panic!("expected select");
        };
        assert_eq!(args.roots, [PathBuf::from("a"), PathBuf::from("b")]);
        assert_eq!(args.includes, ["src/**"]);
        assert_eq!(args.excludes, ["**/test/**"]);
        assert_eq!(args.sort_override(), Some(false));
        assert!(args.null);
    }

    #[test]
    fn test_files_only_conflicts_with_dirs_only() {
        let result =
            Cli::try_parse_from(["antwalk", "select", ".", "--files-only", "--dirs-only"]);
        assert!(result.is_err());
    }
}

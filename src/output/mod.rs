//! Terminal messages for the antwalk CLI.
//!
//! Selected paths go to stdout untouched so they can be piped; everything
//! in this module writes to stderr, colored and filtered by a global
//! verbosity level.

use colored::Colorize;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::walker::WalkSummary;

/// Verbosity level for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Only warnings and errors.
    Quiet = 0,
    /// Default level.
    Normal = 1,
    /// Adds per-walk statistics.
    Verbose = 2,
}

/// Global verbosity setting (default: Normal).
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Sets the global verbosity level for all output functions.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Gets the current global verbosity level.
pub fn get_verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Normal,
    }
}

/// Prints a success message in green (respects quiet mode).
pub fn success(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{}", message.green());
}

/// Prints a warning message in bold yellow (always shown).
pub fn warning(message: &str) {
    eprintln!("{}", message.yellow().bold());
}

/// Prints a message only in verbose mode.
pub fn verbose(message: &str) {
    if get_verbosity() != Verbosity::Verbose {
        return;
    }
    eprintln!("{}", message.dimmed());
}

/// One line describing a finished walk.
#[must_use]
pub fn format_summary(root: &str, summary: &WalkSummary) -> String {
    if !summary.root_found {
        return format!("{root}: not found");
    }
    let mut line = format!(
        "{root}: {} files, {} directories, {} pruned",
        summary.files_visited, summary.dirs_visited, summary.dirs_pruned
    );
    if !summary.unreadable.is_empty() {
        line.push_str(&format!(", {} unreadable", summary.unreadable.len()));
    }
    line
}

/// Report a finished walk: statistics in verbose mode, unreadable
/// directories always.
pub fn walk_summary(root: &str, summary: &WalkSummary) {
    for dir in &summary.unreadable {
        warning(&format!("skipped unreadable directory {}", dir.display()));
    }
    verbose(&format_summary(root, summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_verbosity_round_trip() {
        let levels = [Verbosity::Quiet, Verbosity::Normal, Verbosity::Verbose];
        for level in &levels {
            set_verbosity(*level);
            assert_eq!(get_verbosity(), *level);
        }
        set_verbosity(Verbosity::Normal);
    }

    #[test]
    fn test_format_summary() {
        let mut summary = WalkSummary {
            root_found: true,
            files_visited: 3,
            dirs_visited: 2,
            dirs_pruned: 1,
            unreadable: Vec::new(),
        };
        assert_eq!(
            format_summary("src", &summary),
            "src: 3 files, 2 directories, 1 pruned"
        );

        summary.unreadable.push(PathBuf::from("/locked"));
        assert!(format_summary("src", &summary).ends_with(", 1 unreadable"));

        assert_eq!(
            format_summary("gone", &WalkSummary::default()),
            "gone: not found"
        );
    }
}

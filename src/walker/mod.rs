//! Directory walking with include/exclude pattern filtering.
//!
//! A [`DirectoryWalker`] owns two ordered matcher lists, walks a tree from a
//! root and reports every admitted entry to a [`FileVisitor`] supplied by the
//! caller. [`BreadthFirstDirectoryWalker`] is the implementation: all entries
//! at depth N are reported before any entry at depth N + 1, and directories
//! rejected by the patterns are pruned without being listed.
//!
//! # Example
//!
//! ```no_run
//! use antwalk::walker::{BreadthFirstDirectoryWalker, DirectoryWalker, SelectionCollector};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut walker = BreadthFirstDirectoryWalker::new(true, SelectionCollector::new());
//! walker.set_includes(&["src/**"])?;
//! walker.set_excludes(&["**/test/**"])?;
//!
//! let summary = walker.start(Path::new("."))?;
//! for entry in walker.visitor().entries() {
//!     println!("{}", entry.path);
//! }
//! println!("{} files", summary.files_visited);
//! # Ok(())
//! # }
//! ```

/// Breadth-first walker implementation.
pub mod breadth_first;

/// A visitor that records notifications in order.
pub mod collect;

pub use breadth_first::BreadthFirstDirectoryWalker;
pub use collect::{EntryKind, SelectedEntry, SelectionCollector};

use crate::pattern::PatternError;
use crate::relative_path::RelativePath;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Receives the entries admitted by a walk.
///
/// Returning an error from either method stops the walk; the error comes
/// back out of [`DirectoryWalker::start`] as [`WalkError::Visitor`].
pub trait FileVisitor {
    /// Called for every admitted file. `file` is the absolute location.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk.
    fn visit_file(&mut self, file: &Path, path: &RelativePath) -> anyhow::Result<()>;

    /// Called for every admitted directory, before anything below it.
    ///
    /// # Errors
    ///
    /// Any error aborts the walk.
    fn visit_dir(&mut self, dir: &Path, path: &RelativePath) -> anyhow::Result<()>;
}

impl<V: FileVisitor + ?Sized> FileVisitor for &mut V {
    fn visit_file(&mut self, file: &Path, path: &RelativePath) -> anyhow::Result<()> {
        (**self).visit_file(file, path)
    }

    fn visit_dir(&mut self, dir: &Path, path: &RelativePath) -> anyhow::Result<()> {
        (**self).visit_dir(dir, path)
    }
}

/// A pattern-filtered directory walker.
pub trait DirectoryWalker {
    /// Replace the include patterns. Nothing changes if any pattern fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] encountered.
    fn set_includes<S: AsRef<str>>(&mut self, patterns: &[S]) -> Result<(), PatternError>;

    /// Replace the exclude patterns. Nothing changes if any pattern fails.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] encountered.
    fn set_excludes<S: AsRef<str>>(&mut self, patterns: &[S]) -> Result<(), PatternError>;

    /// Walk from `root`, notifying the visitor.
    ///
    /// A missing root is not an error: the walk reports nothing and the
    /// summary has `root_found == false`.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::Visitor`] if the visitor fails, or
    /// [`WalkError::Unreadable`] when a directory cannot be listed under
    /// [`UnreadablePolicy::Abort`].
    fn start(&mut self, root: &Path) -> Result<WalkSummary, WalkError>;
}

/// What to do with a directory whose children cannot be listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnreadablePolicy {
    /// Treat it as empty, log a warning and record it in
    /// [`WalkSummary::unreadable`].
    #[default]
    Skip,
    /// Stop the walk with [`WalkError::Unreadable`].
    Abort,
}

/// Traversal options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Follow symbolic links. When false a link is reported as a file.
    pub follow_symlinks: bool,
    /// Visit children sorted by file name instead of filesystem order.
    pub sort_entries: bool,
    /// Handling of directories that cannot be listed.
    pub on_unreadable: UnreadablePolicy,
}

/// Outcome of a completed walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// False when the root did not exist or could not be resolved.
    pub root_found: bool,
    /// Number of `visit_file` notifications.
    pub files_visited: usize,
    /// Number of `visit_dir` notifications.
    pub dirs_visited: usize,
    /// Directories rejected by the patterns and therefore not descended.
    pub dirs_pruned: usize,
    /// Directories skipped because they could not be listed.
    pub unreadable: Vec<PathBuf>,
}

impl WalkSummary {
    /// Total number of notifications sent to the visitor.
    #[must_use]
    pub const fn total_visited(&self) -> usize {
        self.files_visited + self.dirs_visited
    }
}

/// Errors that stop a walk.
#[derive(Debug, Error)]
pub enum WalkError {
    /// A directory could not be listed and the policy is
    /// [`UnreadablePolicy::Abort`].
    #[error("cannot read directory {}", path.display())]
    Unreadable {
        /// The directory that failed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The visitor returned an error.
    #[error(transparent)]
    Visitor(#[from] anyhow::Error),
}

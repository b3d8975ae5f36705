//! A visitor that records every notification it receives.

use super::FileVisitor;
use crate::relative_path::RelativePath;
use std::path::{Path, PathBuf};

/// Kind of a reported entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Reported through `visit_file`.
    File,
    /// Reported through `visit_dir`.
    Dir,
}

/// One notification received by a [`SelectionCollector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEntry {
    /// File or directory.
    pub kind: EntryKind,
    /// Absolute location on disk.
    pub location: PathBuf,
    /// Path relative to the walk root.
    pub path: RelativePath,
}

/// Records every notification in the order it arrived.
#[derive(Debug, Clone, Default)]
pub struct SelectionCollector {
    /// Entries in notification order.
    entries: Vec<SelectedEntry>,
}

impl SelectionCollector {
    /// An empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in notification order.
    #[must_use]
    pub fn entries(&self) -> &[SelectedEntry] {
        &self.entries
    }

    /// Consume the collector, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<SelectedEntry> {
        self.entries
    }

    /// Relative paths of reported files, in order.
    pub fn files(&self) -> impl Iterator<Item = &RelativePath> {
        self.of_kind(EntryKind::File)
    }

    /// Relative paths of reported directories, in order.
    pub fn dirs(&self) -> impl Iterator<Item = &RelativePath> {
        self.of_kind(EntryKind::Dir)
    }

    /// Relative paths of one kind.
    fn of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &RelativePath> {
        self.entries
            .iter()
            .filter(move |e| e.kind == kind)
            .map(|e| &e.path)
    }

    /// Record one entry.
    fn push(&mut self, kind: EntryKind, location: &Path, path: &RelativePath) {
        self.entries.push(SelectedEntry {
            kind,
            location: location.to_path_buf(),
            path: path.clone(),
        });
    }
}

impl FileVisitor for SelectionCollector {
    fn visit_file(&mut self, file: &Path, path: &RelativePath) -> anyhow::Result<()> {
        self.push(EntryKind::File, file, path);
        Ok(())
    }

    fn visit_dir(&mut self, dir: &Path, path: &RelativePath) -> anyhow::Result<()> {
        self.push(EntryKind::Dir, dir, path);
        Ok(())
    }
}

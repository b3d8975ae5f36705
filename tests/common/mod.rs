#![allow(dead_code)]

use antwalk::walker::{EntryKind, SelectionCollector};
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway directory tree for walker and CLI tests
pub struct TestTree {
    pub temp_dir: TempDir,
    /// Kept outside the tree so walks never see it
    pub config_dir: TempDir,
}

impl TestTree {
    /// Create an empty tree
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            config_dir: TempDir::new()?,
        })
    }

    /// Create a tree holding the given files (parents created as needed)
    pub fn with_files(files: &[&str]) -> Result<Self> {
        let tree = Self::new()?;
        for file in files {
            tree.file(file)?;
        }
        Ok(tree)
    }

    /// Root of the tree
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create an empty file at `rel`
    pub fn file(&self, rel: &str) -> Result<PathBuf> {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, rel)?;
        Ok(path)
    }

    /// Create a directory at `rel`
    pub fn dir(&self, rel: &str) -> Result<PathBuf> {
        let path = self.path().join(rel);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Location for an isolated config file
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config.toml")
    }
}

/// Notifications rendered as `f:path` / `d:path`, in order
pub fn notifications(collector: &SelectionCollector) -> Vec<String> {
    collector
        .entries()
        .iter()
        .map(|e| match e.kind {
            EntryKind::File => format!("f:{}", e.path),
            EntryKind::Dir => format!("d:{}", e.path),
        })
        .collect()
}

pub mod parser;
pub mod validator;

use crate::walker::{UnreadablePolicy, WalkOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

/// Ant's built-in excludes: version control metadata and editor droppings.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "**/*~",
    "**/#*#",
    "**/.#*",
    "**/%*%",
    "**/._*",
    "**/CVS",
    "**/CVS/**",
    "**/.cvsignore",
    "**/SCCS",
    "**/SCCS/**",
    "**/vssver.scc",
    "**/.svn",
    "**/.svn/**",
    "**/.DS_Store",
    "**/.git",
    "**/.git/**",
    "**/.gitattributes",
    "**/.gitignore",
    "**/.gitmodules",
    "**/.hg",
    "**/.hg/**",
    "**/.hgignore",
    "**/.hgsub",
    "**/.hgsubstate",
    "**/.hgtags",
    "**/.bzr",
    "**/.bzr/**",
    "**/.bzrignore",
];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub walk: WalkConfig,

    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Named include/exclude sets, selectable with `select --set <name>`
    #[serde(default)]
    pub sets: BTreeMap<String, PatternSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkConfig {
    #[serde(default = "default_case_sensitive")]
    pub case_sensitive: bool,
    #[serde(default)]
    pub follow_symlinks: bool,
    #[serde(default = "default_sort_entries")]
    pub sort_entries: bool,
    #[serde(default)]
    pub on_unreadable: UnreadablePolicy,
    #[serde(default = "default_default_excludes")]
    pub default_excludes: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
}

/// A reusable pair of pattern lists
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PatternSet {
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            follow_symlinks: false,
            sort_entries: true,
            on_unreadable: UnreadablePolicy::Skip,
            default_excludes: true,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_threads: default_parallel_threads(),
        }
    }
}

impl WalkConfig {
    /// Traversal options derived from this section
    #[must_use]
    pub const fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            follow_symlinks: self.follow_symlinks,
            sort_entries: self.sort_entries,
            on_unreadable: self.on_unreadable,
        }
    }

    /// Excludes implied by configuration alone
    #[must_use]
    pub fn implicit_excludes(&self) -> Vec<String> {
        if self.default_excludes {
            DEFAULT_EXCLUDES.iter().map(ToString::to_string).collect()
        } else {
            Vec::new()
        }
    }
}

impl Config {
    /// Look up a named pattern set
    #[must_use]
    pub fn pattern_set(&self, name: &str) -> Option<&PatternSet> {
        self.sets.get(name)
    }

    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot read or parse the configuration file
    /// - Configuration file contains invalid TOML or invalid values
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        parser::parse_config_file(path)
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Pattern sets are addressed as `sets.<name>.includes` and render as a
    /// comma separated list.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["walk", "case_sensitive"] => Some(self.walk.case_sensitive.to_string()),
            ["walk", "follow_symlinks"] => Some(self.walk.follow_symlinks.to_string()),
            ["walk", "sort_entries"] => Some(self.walk.sort_entries.to_string()),
            ["walk", "on_unreadable"] => Some(policy_name(self.walk.on_unreadable).to_string()),
            ["walk", "default_excludes"] => Some(self.walk.default_excludes.to_string()),
            ["performance", "parallel_threads"] => {
                Some(self.performance.parallel_threads.to_string())
            }
            ["sets", name, "includes"] => self.sets.get(*name).map(|s| s.includes.join(",")),
            ["sets", name, "excludes"] => self.sets.get(*name).map(|s| s.excludes.join(",")),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Pattern lists are given comma separated; every pattern must compile.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The key is unknown
    /// - The value cannot be parsed for the key
    /// - A pattern in a set does not compile
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["walk", "case_sensitive"] => self.walk.case_sensitive = parse_bool(&value)?,
            ["walk", "follow_symlinks"] => self.walk.follow_symlinks = parse_bool(&value)?,
            ["walk", "sort_entries"] => self.walk.sort_entries = parse_bool(&value)?,
            ["walk", "default_excludes"] => self.walk.default_excludes = parse_bool(&value)?,
            ["walk", "on_unreadable"] => {
                self.walk.on_unreadable = match value.as_str() {
                    "skip" => UnreadablePolicy::Skip,
                    "abort" => UnreadablePolicy::Abort,
                    _ => anyhow::bail!("on_unreadable must be 'skip' or 'abort', got '{value}'"),
                };
            }
            ["performance", "parallel_threads"] => {
                let threads: usize = value
                    .parse()
                    .with_context(|| format!("Invalid number: {value}"))?;
                if threads == 0 {
                    anyhow::bail!("Parallel threads must be at least 1");
                }
                self.performance.parallel_threads = threads;
            }
            ["sets", name, field @ ("includes" | "excludes")] => {
                let patterns = split_patterns(&value);
                parser::check_patterns(name, &patterns)?;
                let set = self.sets.entry((*name).to_string()).or_default();
                if *field == "includes" {
                    set.includes = patterns;
                } else {
                    set.excludes = patterns;
                }
            }
            _ => return Err(anyhow::anyhow!("Unknown configuration key: {key}")),
        }
        Ok(())
    }

    /// Unset a configuration value by key
    ///
    /// Walk and performance keys return to their defaults; `sets.<name>`
    /// removes the whole set.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or names a set that does not exist
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();
        let defaults = WalkConfig::default();
        match parts.as_slice() {
            ["walk", "case_sensitive"] => self.walk.case_sensitive = defaults.case_sensitive,
            ["walk", "follow_symlinks"] => self.walk.follow_symlinks = defaults.follow_symlinks,
            ["walk", "sort_entries"] => self.walk.sort_entries = defaults.sort_entries,
            ["walk", "on_unreadable"] => self.walk.on_unreadable = defaults.on_unreadable,
            ["walk", "default_excludes"] => {
                self.walk.default_excludes = defaults.default_excludes;
            }
            ["performance", "parallel_threads"] => {
                self.performance.parallel_threads = default_parallel_threads();
            }
            ["sets", name] => {
                if self.sets.remove(*name).is_none() {
                    anyhow::bail!("No pattern set named '{name}'");
                }
            }
            ["sets", name, field @ ("includes" | "excludes")] => {
                let set = self
                    .sets
                    .get_mut(*name)
                    .with_context(|| format!("No pattern set named '{name}'"))?;
                if *field == "includes" {
                    set.includes.clear();
                } else {
                    set.excludes.clear();
                }
            }
            _ => return Err(anyhow::anyhow!("Cannot unset configuration key: {key}")),
        }
        Ok(())
    }
}

/// Config spelling of an unreadable policy
#[must_use]
pub const fn policy_name(policy: UnreadablePolicy) -> &'static str {
    match policy {
        UnreadablePolicy::Skip => "skip",
        UnreadablePolicy::Abort => "abort",
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    value
        .parse()
        .with_context(|| format!("Invalid boolean: {value}"))
}

fn split_patterns(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToString::to_string)
        .collect()
}

static NUM_CPUS: std::sync::LazyLock<usize> = std::sync::LazyLock::new(|| {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
});

// Default functions for serde
const fn default_case_sensitive() -> bool {
    true
}

const fn default_sort_entries() -> bool {
    true
}

const fn default_default_excludes() -> bool {
    true
}

fn default_parallel_threads() -> usize {
    (*NUM_CPUS).min(8)
}

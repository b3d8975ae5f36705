use super::Config;
use crate::pattern::PatternMatcherFactory;
use anyhow::{Context, Result};
use memmap2::MmapOptions;
use std::fs::File;
use std::path::Path;

/// Files at or above this size are memory mapped instead of read.
const MMAP_THRESHOLD: u64 = 4096;

/// Read, parse and validate a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not UTF-8, is not valid
/// TOML, or holds invalid values.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat config file: {}", path.display()))?;

    if metadata.len() < MMAP_THRESHOLD {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        parse_config_str(&content)
    } else {
        let file = File::open(path)?;
        // SAFETY: the map is read-only and dropped before this function returns.
        let mmap = unsafe { MmapOptions::new().map(&file)? };

        let content = simdutf8::basic::from_utf8(&mmap)
            .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in config file: {e}"))?;

        parse_config_str(content)
    }
}

/// Parse configuration text and validate it.
///
/// # Errors
///
/// Returns an error for malformed TOML or invalid values.
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse TOML config")?;

    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &Config) -> Result<()> {
    if config.performance.parallel_threads == 0 {
        anyhow::bail!("Parallel threads must be at least 1");
    }

    for (name, set) in &config.sets {
        check_patterns(name, &set.includes)?;
        check_patterns(name, &set.excludes)?;
    }

    Ok(())
}

/// Ensure every pattern of the named set compiles.
///
/// # Errors
///
/// Returns the first compilation failure, naming the set.
pub fn check_patterns(set: &str, patterns: &[String]) -> Result<()> {
    PatternMatcherFactory::compile_all(true, true, patterns)
        .with_context(|| format!("Invalid pattern in set '{set}'"))?;
    Ok(())
}

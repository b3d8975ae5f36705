use anyhow::{Context, Result};
use colored::Colorize;
use std::collections::HashSet;
use std::path::Path;

/// Fields a pattern set may carry.
const SET_FIELDS: &[&str] = &["includes", "excludes"];

/// Flags configuration keys that antwalk does not understand
pub struct ConfigValidator {
    /// Set of valid configuration fields
    known_fields: HashSet<String>,
    /// Fields that used to mean something and are now ignored
    deprecated_fields: HashSet<String>,
}

impl ConfigValidator {
    /// Create a new validator with known configuration fields
    #[must_use]
    pub fn new() -> Self {
        let known_fields = [
            "walk.case_sensitive",
            "walk.follow_symlinks",
            "walk.sort_entries",
            "walk.on_unreadable",
            "walk.default_excludes",
            "performance.parallel_threads",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let deprecated_fields = ["walk.ignore_case"].into_iter().map(String::from).collect();

        Self {
            known_fields,
            deprecated_fields,
        }
    }

    /// Validate a configuration file on disk and print warnings to stderr
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub fn validate_config_file(&self, config_path: &Path) -> Result<()> {
        if !config_path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let parsed: toml::Value = toml::from_str(&content)?;

        let warnings = self.collect_warnings(&parsed);
        if !warnings.is_empty() {
            eprintln!("{}", "Configuration warnings:".yellow().bold());
            for warning in warnings {
                eprintln!("  {warning}");
            }
            eprintln!();
        }

        Ok(())
    }

    /// Warnings for every unknown or deprecated field in `parsed`
    #[must_use]
    pub fn collect_warnings(&self, parsed: &toml::Value) -> Vec<String> {
        let mut unknown = Vec::new();
        let mut deprecated = Vec::new();
        self.check_table(parsed, "", &mut unknown, &mut deprecated);

        let mut warnings: Vec<String> = unknown
            .iter()
            .map(|field| format!("Unknown configuration field: {}", field.yellow()))
            .collect();

        for field in &deprecated {
            let suggestion = match field.as_str() {
                "walk.ignore_case" => "Use walk.case_sensitive instead.",
                _ => "This field is deprecated and will be removed in a future version.",
            };
            warnings.push(format!(
                "Deprecated field '{}': {}",
                field.yellow(),
                suggestion.dimmed()
            ));
        }

        warnings
    }

    /// Recursively checks a TOML table for unknown and deprecated fields
    fn check_table(
        &self,
        table: &toml::Value,
        prefix: &str,
        unknown: &mut Vec<String>,
        deprecated: &mut Vec<String>,
    ) {
        let toml::Value::Table(map) = table else {
            return;
        };

        for (key, value) in map {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };

            if let Some(set_name) = full_key.strip_prefix("sets.") {
                Self::check_pattern_set(value, set_name, unknown);
                continue;
            }

            if self.deprecated_fields.contains(&full_key) {
                deprecated.push(full_key);
                continue;
            }

            if let toml::Value::Table(_) = value {
                self.check_table(value, &full_key, unknown, deprecated);
            } else if !self.known_fields.contains(&full_key) {
                unknown.push(full_key);
            }
        }
    }

    /// Validates the fields under `sets.<name>`
    fn check_pattern_set(value: &toml::Value, name: &str, unknown: &mut Vec<String>) {
        match value {
            toml::Value::Table(map) => {
                for key in map.keys() {
                    if !SET_FIELDS.contains(&key.as_str()) {
                        unknown.push(format!("sets.{name}.{key}"));
                    }
                }
            }
            _ => unknown.push(format!("sets.{name}")),
        }
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

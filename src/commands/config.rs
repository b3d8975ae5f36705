use crate::AntwalkContext;
use crate::config::{Config, DEFAULT_EXCLUDES, policy_name};
use crate::output;
use anyhow::Result;
use colored::Colorize;

/// Execute config command to get/set configuration values
///
/// # Errors
///
/// Returns an error if:
/// - Failed to set or unset configuration value
/// - Failed to save configuration
pub fn execute(
    ctx: &mut AntwalkContext,
    key: Option<&str>,
    value: Option<String>,
    unset: bool,
    list: bool,
) -> Result<()> {
    let Some(key) = key.filter(|_| !list) else {
        println!("{}", render_config(&ctx.config));
        return Ok(());
    };

    if unset {
        ctx.config.unset(key)?;
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("Unset {key}"));
    } else if let Some(val) = value {
        ctx.config.set(key, val.clone())?;
        ctx.config.save(&ctx.config_path)?;
        output::success(&format!("Set {key} = {val}"));
    } else if let Some(val) = ctx.config.get(key) {
        println!("{val}");
    } else {
        output::warning(&format!("Configuration key '{key}' is not set"));
    }

    Ok(())
}

/// Human-readable listing of every configuration value
#[must_use]
pub fn render_config(config: &Config) -> String {
    let mut lines = vec![format!("{}", "[walk]".bold())];
    lines.push(format!("  case_sensitive = {}", config.walk.case_sensitive));
    lines.push(format!("  follow_symlinks = {}", config.walk.follow_symlinks));
    lines.push(format!("  sort_entries = {}", config.walk.sort_entries));
    lines.push(format!(
        "  on_unreadable = {}",
        policy_name(config.walk.on_unreadable)
    ));
    lines.push(format!(
        "  default_excludes = {} {}",
        config.walk.default_excludes,
        format!("({} patterns)", DEFAULT_EXCLUDES.len()).dimmed()
    ));

    lines.push(String::new());
    lines.push(format!("{}", "[performance]".bold()));
    lines.push(format!(
        "  parallel_threads = {}",
        config.performance.parallel_threads
    ));

    for (name, set) in &config.sets {
        lines.push(String::new());
        lines.push(format!("{}", format!("[sets.{name}]").bold()));
        lines.push(format!("  includes = {:?}", set.includes));
        lines.push(format!("  excludes = {:?}", set.excludes));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PatternSet;

    #[test]
    fn test_render_config_lists_sets() {
        colored::control::set_override(false);
        let mut config = Config::default();
        config.sets.insert(
            "docs".to_string(),
            PatternSet {
                includes: vec!["docs/**".to_string()],
                excludes: Vec::new(),
            },
        );

        let rendered = render_config(&config);
        assert!(rendered.contains("[walk]"));
        assert!(rendered.contains("on_unreadable = skip"));
        assert!(rendered.contains("[sets.docs]"));
        assert!(rendered.contains(r#"includes = ["docs/**"]"#));
    }
}

use crate::output;
use crate::pattern::{PatternMatcher, PatternMatcherFactory};
use crate::relative_path::RelativePath;
use anyhow::{Context, Result};
use colored::Colorize;

/// Evaluate `matcher` against every path, treating them as files unless
/// `as_dir` is set. Pairs are returned in input order.
#[must_use]
pub fn evaluate<'a>(
    matcher: &PatternMatcher,
    paths: &'a [String],
    as_dir: bool,
) -> Vec<(&'a str, bool)> {
    paths
        .iter()
        .map(|p| {
            let candidate = RelativePath::parse(!as_dir, p);
            (p.as_str(), matcher.is_satisfied_by(&candidate))
        })
        .collect()
}

/// Execute the match command: compile one pattern and report each path.
///
/// # Errors
///
/// Returns an error if the pattern does not compile
pub fn execute(
    pattern: &str,
    paths: &[String],
    exclude: bool,
    ignore_case: bool,
    as_dir: bool,
) -> Result<()> {
    let matcher = PatternMatcherFactory::compile(!exclude, !ignore_case, pattern)
        .with_context(|| format!("Cannot compile pattern '{pattern}'"))?;

    output::verbose(&format!(
        "compiled '{}' as {} {} matcher",
        matcher.pattern(),
        matcher.kind(),
        if matcher.is_include() { "include" } else { "exclude" }
    ));

    for (path, matched) in evaluate(&matcher, paths, as_dir) {
        if matched {
            println!("{}\t{path}", "match".green());
        } else {
            println!("{}\t{path}", "no match".dimmed());
        }
    }

    Ok(())
}

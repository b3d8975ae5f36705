//! Pattern compilation.
//!
//! Patterns are normalised (`\` to `/`, leading `./` and `/` dropped, a
//! trailing `/` read as `/**`) and then classified into the cheapest
//! [`MatcherKind`](super::MatcherKind) that can evaluate them.

use super::segment::{SegmentPattern, has_wildcard};
use super::{MatcherSettings, PatternError, PatternMatcher};

/// Compiles pattern strings into [`PatternMatcher`]s.
pub struct PatternMatcherFactory;

impl PatternMatcherFactory {
    /// Compile `pattern` into a matcher.
    ///
    /// `for_include` selects include semantics (directory prefixes of the
    /// pattern are accepted). With `case_sensitive` false, the pattern and
    /// every candidate segment are compared lowercased.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the pattern is empty, contains an empty
    /// segment, uses `**` inside a longer segment, or contains NUL.
    pub fn compile(
        for_include: bool,
        case_sensitive: bool,
        pattern: &str,
    ) -> Result<PatternMatcher, PatternError> {
        let segments = normalize(pattern)?;
        let settings = MatcherSettings {
            pattern: segments.join("/"),
            for_include,
            case_sensitive,
        };

        let segments: Vec<String> = if case_sensitive {
            segments
        } else {
            segments.iter().map(|s| s.to_lowercase()).collect()
        };

        if segments.len() == 1 && segments[0] == "**" {
            return Ok(PatternMatcher::All { settings });
        }

        if !segments.iter().any(|s| has_wildcard(s)) {
            return Ok(PatternMatcher::Literal { settings, segments });
        }

        if segments.len() == 1 {
            return Ok(PatternMatcher::Name {
                settings,
                glob: SegmentPattern::compile(&segments[0]),
            });
        }

        Ok(PatternMatcher::Wildcard {
            settings,
            segments: segments
                .iter()
                .map(|s| SegmentPattern::compile(s))
                .collect(),
        })
    }

    /// Compile a list of patterns, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// Returns the [`PatternError`] of the first pattern that fails.
    pub fn compile_all<I, S>(
        for_include: bool,
        case_sensitive: bool,
        patterns: I,
    ) -> Result<Vec<PatternMatcher>, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .map(|p| Self::compile(for_include, case_sensitive, p.as_ref()))
            .collect()
    }
}

/// Split a raw pattern into validated segments.
///
/// `\` is a separator like `/`; leading separators and `./` are dropped; a
/// trailing separator becomes a trailing `**`; runs of `**` collapse.
fn normalize(raw: &str) -> Result<Vec<String>, PatternError> {
    if raw.contains('\0') {
        return Err(PatternError::NulByte);
    }

    let unified = raw.trim().replace('\\', "/");
    let mut body = unified.as_str();
    loop {
        if let Some(rest) = body.strip_prefix("./") {
            body = rest;
        } else if let Some(rest) = body.strip_prefix('/') {
            body = rest;
        } else {
            break;
        }
    }

    if body.is_empty() || body == "." {
        return Err(PatternError::Empty);
    }

    let trailing_separator = body.ends_with('/');
    let body = body.trim_end_matches('/');

    let mut segments: Vec<String> = Vec::new();
    for part in body.split('/') {
        if part.is_empty() {
            return Err(PatternError::EmptySegment {
                pattern: raw.to_string(),
            });
        }
        if part != "**" && part.contains("**") {
            return Err(PatternError::InvalidDoubleStar {
                pattern: raw.to_string(),
                segment: part.to_string(),
            });
        }
        if part == "**" && segments.last().is_some_and(|last| last == "**") {
            continue;
        }
        segments.push(part.to_string());
    }

    if trailing_separator && segments.last().is_none_or(|last| last != "**") {
        segments.push("**".to_string());
    }

    Ok(segments)
}

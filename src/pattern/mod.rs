//! Ant-style pattern matching over [`RelativePath`]s.
//!
//! Patterns are split into segments on `/` (or `\`). Within a segment `?`
//! matches one character and `*` matches any run of characters; a segment
//! consisting of `**` matches any number of whole segments, including none.
//! A trailing separator is shorthand for a trailing `**`.
//!
//! Patterns are compiled once by [`PatternMatcherFactory`] into a
//! [`PatternMatcher`], a closed set of strategies picked from the pattern's
//! shape.
//!
//! ```
//! use antwalk::{PatternMatcherFactory, RelativePath};
//!
//! # fn main() -> Result<(), antwalk::PatternError> {
//! let matcher = PatternMatcherFactory::compile(false, true, "src/**/*.java")?;
//!
//! assert!(matcher.is_satisfied_by(&RelativePath::parse(true, "src/Foo.java")));
//! assert!(matcher.is_satisfied_by(&RelativePath::parse(true, "src/a/b/Foo.java")));
//! assert!(!matcher.is_satisfied_by(&RelativePath::parse(true, "test/Foo.java")));
//! # Ok(())
//! # }
//! ```

/// Pattern string normalization and compilation.
pub mod factory;

/// Single-segment compiled patterns and the character-level matcher.
pub mod segment;

pub use factory::PatternMatcherFactory;
pub use segment::SegmentPattern;

use crate::relative_path::RelativePath;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Errors raised while compiling a pattern string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The pattern is blank or consists only of separators.
    #[error("empty pattern")]
    Empty,

    /// The pattern contains an empty segment such as `a//b`.
    #[error("empty path segment in pattern '{pattern}'")]
    EmptySegment {
        /// The offending pattern as given.
        pattern: String,
    },

    /// `**` appears inside a segment together with other characters.
    #[error("'**' must be a whole path segment in pattern '{pattern}' (found '{segment}')")]
    InvalidDoubleStar {
        /// The offending pattern as given.
        pattern: String,
        /// The segment mixing `**` with other characters.
        segment: String,
    },

    /// The pattern contains a NUL character.
    #[error("pattern contains a NUL character")]
    NulByte,
}

/// Which matching strategy a compiled pattern uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// `**` alone.
    All,
    /// No wildcards at all.
    Literal,
    /// A single segment with `*` or `?`.
    Name,
    /// Several segments with at least one wildcard.
    Wildcard,
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::All => "all",
            Self::Literal => "literal",
            Self::Name => "name",
            Self::Wildcard => "wildcard",
        };
        f.write_str(name)
    }
}

/// Settings shared by every matcher variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherSettings {
    /// Normalized source pattern (separators unified, trailing `/` expanded).
    pub(crate) pattern: String,
    /// Include matchers accept directory prefixes of the pattern.
    pub(crate) for_include: bool,
    /// When false, pattern and candidate are compared lowercased.
    pub(crate) case_sensitive: bool,
}

/// A compiled glob pattern.
///
/// Immutable once built; evaluating it keeps no state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternMatcher {
    /// Matches every path.
    All {
        /// Shared settings.
        settings: MatcherSettings,
    },

    /// Exact segment-by-segment comparison.
    Literal {
        /// Shared settings.
        settings: MatcherSettings,
        /// Literal segments (lowercased when case-insensitive).
        segments: Vec<String>,
    },

    /// One glob segment, matched against single-segment paths.
    Name {
        /// Shared settings.
        settings: MatcherSettings,
        /// The compiled glob.
        glob: SegmentPattern,
    },

    /// General multi-segment matcher with `**` backtracking.
    Wildcard {
        /// Shared settings.
        settings: MatcherSettings,
        /// Compiled segments.
        segments: Vec<SegmentPattern>,
    },
}

impl PatternMatcher {
    /// The settings common to all variants.
    const fn settings(&self) -> &MatcherSettings {
        match self {
            Self::All { settings }
            | Self::Literal { settings, .. }
            | Self::Name { settings, .. }
            | Self::Wildcard { settings, .. } => settings,
        }
    }

    /// The normalized pattern this matcher was compiled from.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.settings().pattern
    }

    /// Whether this matcher was compiled for an include list.
    #[must_use]
    pub const fn is_include(&self) -> bool {
        self.settings().for_include
    }

    /// Whether comparisons are case sensitive.
    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.settings().case_sensitive
    }

    /// The strategy picked for this pattern.
    #[must_use]
    pub const fn kind(&self) -> MatcherKind {
        match self {
            Self::All { .. } => MatcherKind::All,
            Self::Literal { .. } => MatcherKind::Literal,
            Self::Name { .. } => MatcherKind::Name,
            Self::Wildcard { .. } => MatcherKind::Wildcard,
        }
    }

    /// Whether `path` satisfies this pattern.
    ///
    /// Include matchers also accept a directory whose segments line up with
    /// a proper prefix of the pattern, so that a walk can reach deeper
    /// matches through it. Exclude matchers never do.
    #[must_use]
    pub fn is_satisfied_by(&self, path: &RelativePath) -> bool {
        let settings = self.settings();
        let accept_prefix = settings.for_include && !path.ends_with_file();
        let names: Vec<Cow<'_, str>> = path
            .segments()
            .iter()
            .map(|s| {
                if settings.case_sensitive {
                    Cow::Borrowed(s.as_str())
                } else {
                    Cow::Owned(s.to_lowercase())
                }
            })
            .collect();

        match self {
            Self::All { .. } => true,
            Self::Literal { segments, .. } => {
                if names.len() > segments.len() {
                    return false;
                }
                if names.len() < segments.len() && !accept_prefix {
                    return false;
                }
                names.iter().zip(segments).all(|(name, lit)| name == lit)
            }
            Self::Name { glob, .. } => match names.as_slice() {
                [] => accept_prefix,
                [name] => glob.matches(name),
                _ => false,
            },
            Self::Wildcard { segments, .. } => match_segments(segments, &names, accept_prefix),
        }
    }
}

impl fmt::Display for PatternMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern())
    }
}

/// Segment-level two-pointer match with backtracking on `**`.
///
/// When a `**` is reached its position is recorded and it first matches zero
/// path segments. If the remainder later fails, the `**` absorbs one more
/// path segment and the remainder is retried from the segment after it. The
/// most recent `**` is the only backtrack point kept.
///
/// Once every path segment is consumed the match succeeds if only `**`
/// segments remain in the pattern, or, with `accept_prefix`, if any pattern
/// remains at all.
fn match_segments<S: AsRef<str>>(
    pattern: &[SegmentPattern],
    names: &[S],
    accept_prefix: bool,
) -> bool {
    let (mut p, mut n) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while n < names.len() {
        match pattern.get(p) {
            Some(SegmentPattern::DoubleStar) => {
                backtrack = Some((p, n));
                p += 1;
            }
            Some(segment) if segment.matches(names[n].as_ref()) => {
                p += 1;
                n += 1;
            }
            _ => match backtrack {
                Some((star_p, star_n)) => {
                    p = star_p + 1;
                    n = star_n + 1;
                    backtrack = Some((star_p, n));
                }
                None => return false,
            },
        }
    }

    let rest = &pattern[p..];
    rest.iter().all(SegmentPattern::is_double_star) || accept_prefix
}

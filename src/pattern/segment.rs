//! Compiled form of a single pattern segment.
//!
//! A segment is the text between two separators. It is either the `**`
//! wildcard, a plain literal, or a glob made of literal characters, `*` and
//! `?`. Globs never see a separator: `*` is confined to one path segment.

/// One compiled pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentPattern {
    /// `**`: zero or more whole path segments.
    DoubleStar,
    /// A segment without wildcards, compared as a whole.
    Literal(String),
    /// A segment containing `*` and/or `?`.
    Glob(Vec<char>),
}

impl SegmentPattern {
    /// Compile a raw segment. The caller has already lowercased it for
    /// case-insensitive matchers and rejected malformed `**` usage.
    pub(crate) fn compile(raw: &str) -> Self {
        if raw == "**" {
            Self::DoubleStar
        } else if has_wildcard(raw) {
            Self::Glob(raw.chars().collect())
        } else {
            Self::Literal(raw.to_string())
        }
    }

    /// True for the `**` segment.
    #[must_use]
    pub const fn is_double_star(&self) -> bool {
        matches!(self, Self::DoubleStar)
    }

    /// Match one path segment name.
    ///
    /// `**` is handled at the path level; here it accepts any single name so
    /// that a lone `**` behaves like `*` when asked about one segment.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::DoubleStar => true,
            Self::Literal(lit) => lit == name,
            Self::Glob(pattern) => {
                let input: Vec<char> = name.chars().collect();
                glob_match(pattern, &input)
            }
        }
    }
}

/// Whether `segment` contains `*` or `?`.
pub(crate) fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?'])
}

/// Character-level two-pointer match with a single backtrack point.
///
/// On `*` the current positions are recorded and zero characters are tried
/// first; on a later mismatch the star absorbs one more input character and
/// matching resumes just after it. Only the most recent star is remembered.
/// `?` consumes exactly one character and never backtracks on its own.
pub(crate) fn glob_match(pattern: &[char], input: &[char]) -> bool {
    let (mut p, mut i) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while i < input.len() {
        match pattern.get(p) {
            Some('*') => {
                star = Some((p, i));
                p += 1;
            }
            Some(&c) if c == '?' || c == input[i] => {
                p += 1;
                i += 1;
            }
            _ => match star {
                Some((star_p, star_i)) => {
                    p = star_p + 1;
                    i = star_i + 1;
                    star = Some((star_p, i));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

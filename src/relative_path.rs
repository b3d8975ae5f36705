//! Root-relative path coordinates used for matching and reporting.
//!
//! A [`RelativePath`] is a purely logical value: an ordered list of segment
//! names from the walk root down to an entry, plus a flag recording whether
//! the last segment names a file. It never touches the filesystem.

use std::fmt;
use std::path::PathBuf;

/// A path relative to a traversal root.
///
/// Zero segments denote the root itself. Extending a path with [`child`]
/// produces a new value; the parent is left untouched, so the same parent can
/// be extended for every sibling in a directory.
///
/// [`child`]: RelativePath::child
///
/// # Examples
///
/// ```
/// use antwalk::RelativePath;
///
/// let src = RelativePath::root(false).child(false, "src");
/// let main = src.child(true, "main.rs");
///
/// assert_eq!(main.segments(), ["src", "main.rs"]);
/// assert!(main.ends_with_file());
/// assert_eq!(main.to_string(), "src/main.rs");
/// assert_eq!(src.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelativePath {
    /// Segment names from the root down to the terminal entry.
    segments: Vec<String>,
    /// Whether the terminal segment is a file (as opposed to a directory).
    ends_with_file: bool,
}

impl RelativePath {
    /// The zero-segment path designating the traversal root.
    #[must_use]
    pub const fn root(ends_with_file: bool) -> Self {
        Self {
            segments: Vec::new(),
            ends_with_file,
        }
    }

    /// Build a path from an explicit segment list.
    #[must_use]
    pub fn new<I, S>(ends_with_file: bool, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            ends_with_file,
        }
    }

    /// Parse a `/` or `\` separated string. Empty parts are skipped, so
    /// `"a//b/"` and `"a/b"` produce the same path.
    #[must_use]
    pub fn parse(ends_with_file: bool, path: &str) -> Self {
        Self::new(
            ends_with_file,
            path.split(['/', '\\']).filter(|part| !part.is_empty()),
        )
    }

    /// A new path with `name` appended.
    #[must_use]
    pub fn child(&self, is_file: bool, name: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(name.into());
        Self {
            segments,
            ends_with_file: is_file,
        }
    }

    /// The parent directory, or `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
            ends_with_file: false,
        })
    }

    /// Segment names, root first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether the terminal segment names a file.
    #[must_use]
    pub const fn ends_with_file(&self) -> bool {
        self.ends_with_file
    }

    /// The terminal segment, if any.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for the zero-segment root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Same as [`is_root`](Self::is_root).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// Convert to a platform path relative to the walk root.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        self.segments.iter().collect()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_has_no_segments() {
        let root = RelativePath::root(false);
        assert!(root.is_root());
        assert_eq!(root.len(), 0);
        assert_eq!(root.last_name(), None);
        assert_eq!(root.to_string(), "");
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_child_leaves_parent_untouched() {
        let parent = RelativePath::root(false).child(false, "src");
        let a = parent.child(true, "a.rs");
        let b = parent.child(false, "b");

        assert_eq!(parent.segments(), ["src"]);
        assert_eq!(a.segments(), ["src", "a.rs"]);
        assert_eq!(b.segments(), ["src", "b"]);
        assert!(a.ends_with_file());
        assert!(!b.ends_with_file());
    }

    #[test]
    fn test_parse_skips_empty_parts() {
        let p = RelativePath::parse(true, "/a//b\\c/");
        assert_eq!(p.segments(), ["a", "b", "c"]);
        assert_eq!(p, RelativePath::new(true, ["a", "b", "c"]));
    }

    #[test]
    fn test_equality_includes_terminal_flag() {
        let file = RelativePath::parse(true, "a/b");
        let dir = RelativePath::parse(false, "a/b");
        assert_ne!(file, dir);
        assert_eq!(file.segments(), dir.segments());
    }

    #[test]
    fn test_ordering_is_by_segments_first() {
        let mut paths = vec![
            RelativePath::parse(true, "b"),
            RelativePath::parse(false, "a/c"),
            RelativePath::parse(true, "a"),
        ];
        paths.sort();
        let rendered: Vec<String> = paths.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["a", "a/c", "b"]);
    }

    #[test]
    fn test_parent_is_directory() {
        let p = RelativePath::parse(true, "a/b/c.txt");
        let parent = p.parent().unwrap();
        assert_eq!(parent, RelativePath::parse(false, "a/b"));
    }

    #[test]
    fn test_to_path_buf() {
        let p = RelativePath::parse(true, "a/b/c.txt");
        assert_eq!(p.to_path_buf(), PathBuf::from("a").join("b").join("c.txt"));
    }
}

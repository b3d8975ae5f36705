use super::{DirectoryWalker, FileVisitor, UnreadablePolicy, WalkError, WalkOptions, WalkSummary};
use crate::pattern::{PatternError, PatternMatcher, PatternMatcherFactory};
use crate::relative_path::RelativePath;
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, warn};
use walkdir::WalkDir;

/// Walks a tree level by level, applying include/exclude matchers.
///
/// Within one directory every admitted file is visited first, then every
/// admitted subdirectory receives `visit_dir`, and only then are those
/// subdirectories queued for listing. A FIFO queue drives the walk, so all
/// entries at one depth are reported before any entry one level deeper and
/// the call stack does not grow with tree depth.
///
/// A path is admitted when it satisfies at least one include (or there are
/// no includes) and no exclude. A rejected directory is pruned: it is never
/// listed, so nothing below it is matched or reported.
pub struct BreadthFirstDirectoryWalker<V> {
    /// Receiver of file and directory notifications.
    visitor: V,
    /// Compiled include patterns; empty admits everything.
    includes: Vec<PatternMatcher>,
    /// Compiled exclude patterns; any match rejects.
    excludes: Vec<PatternMatcher>,
    /// Case sensitivity used when compiling patterns.
    case_sensitive: bool,
    /// Traversal options.
    options: WalkOptions,
}

/// One listed directory entry.
struct Child {
    /// Absolute location.
    path: PathBuf,
    /// File name; entries whose name is not UTF-8 are never listed.
    name: String,
    /// Directory (after following links when enabled).
    is_dir: bool,
}

impl<V: FileVisitor> BreadthFirstDirectoryWalker<V> {
    /// Create a walker with no patterns and default options.
    #[must_use]
    pub fn new(case_sensitive: bool, visitor: V) -> Self {
        Self {
            visitor,
            includes: Vec::new(),
            excludes: Vec::new(),
            case_sensitive,
            options: WalkOptions::default(),
        }
    }

    /// Replace the traversal options.
    #[must_use]
    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    /// Current traversal options.
    #[must_use]
    pub const fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Whether patterns are compiled case sensitively.
    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Compiled include matchers, in the order given.
    #[must_use]
    pub fn includes(&self) -> &[PatternMatcher] {
        &self.includes
    }

    /// Compiled exclude matchers, in the order given.
    #[must_use]
    pub fn excludes(&self) -> &[PatternMatcher] {
        &self.excludes
    }

    /// The visitor.
    #[must_use]
    pub const fn visitor(&self) -> &V {
        &self.visitor
    }

    /// Mutable access to the visitor.
    pub const fn visitor_mut(&mut self) -> &mut V {
        &mut self.visitor
    }

    /// Consume the walker and return the visitor.
    #[must_use]
    pub fn into_visitor(self) -> V {
        self.visitor
    }

    /// Whether `path` passes the include and exclude matchers.
    #[must_use]
    pub fn is_allowed(&self, path: &RelativePath) -> bool {
        if !self.includes.is_empty() && !self.includes.iter().any(|m| m.is_satisfied_by(path)) {
            return false;
        }
        !self.excludes.iter().any(|m| m.is_satisfied_by(path))
    }

    /// Handle a root that is a regular file.
    fn process_single_file(
        &mut self,
        file: &Path,
        summary: &mut WalkSummary,
    ) -> Result<(), WalkError> {
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            warn!(path = %file.display(), "skipping root with non UTF-8 name");
            return Ok(());
        };
        let path = RelativePath::root(true).child(true, name);

        if self.is_allowed(&path) {
            self.visitor.visit_file(file, &path)?;
            summary.files_visited += 1;
        } else {
            debug!(path = %path, "root file rejected by patterns");
        }
        Ok(())
    }

    /// Breadth-first walk below `root`. The root itself is not reported.
    fn walk_tree(&mut self, root: &Path, summary: &mut WalkSummary) -> Result<(), WalkError> {
        let mut queue: VecDeque<(PathBuf, RelativePath)> = VecDeque::new();
        let mut walked: HashSet<PathBuf> = HashSet::new();
        if self.options.follow_symlinks {
            walked.insert(root.to_path_buf());
        }
        queue.push_back((root.to_path_buf(), RelativePath::root(false)));

        while let Some((dir, rel)) = queue.pop_front() {
            let children = match self.list_children(&dir) {
                Ok(children) => children,
                Err(source) => match self.options.on_unreadable {
                    UnreadablePolicy::Skip => {
                        warn!(
                            path = %dir.display(),
                            error = %source,
                            "skipping unreadable directory"
                        );
                        summary.unreadable.push(dir);
                        continue;
                    }
                    UnreadablePolicy::Abort => {
                        return Err(WalkError::Unreadable { path: dir, source });
                    }
                },
            };

            let mut admitted_dirs = Vec::new();
            for Child { path, name, is_dir } in children {
                let child_rel = rel.child(!is_dir, name);
                if !self.is_allowed(&child_rel) {
                    if is_dir {
                        debug!(path = %child_rel, "pruned directory");
                        summary.dirs_pruned += 1;
                    }
                    continue;
                }

                if is_dir {
                    admitted_dirs.push((path, child_rel));
                } else {
                    self.visitor.visit_file(&path, &child_rel)?;
                    summary.files_visited += 1;
                }
            }

            for (path, child_rel) in admitted_dirs {
                self.visitor.visit_dir(&path, &child_rel)?;
                summary.dirs_visited += 1;

                if self.options.follow_symlinks {
                    let real = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
                    if !walked.insert(real) {
                        warn!(
                            path = %path.display(),
                            "directory already walked through another link, not descending"
                        );
                        continue;
                    }
                }
                queue.push_back((path, child_rel));
            }
        }

        Ok(())
    }

    /// List the direct children of `dir`.
    ///
    /// Fails only when `dir` itself cannot be read. Entries that fail on
    /// their own (a dangling link while following links) and names that are
    /// not valid UTF-8 are logged and left out.
    ///
    /// Links are never followed by the listing itself. With
    /// `follow_symlinks`, a link's target decides whether it is a directory;
    /// cycles are caught by the walked set in `walk_tree`.
    fn list_children(&self, dir: &Path) -> io::Result<Vec<Child>> {
        let mut walk = WalkDir::new(dir).min_depth(1).max_depth(1);
        if self.options.sort_entries {
            walk = walk.sort_by_file_name();
        }

        let mut children = Vec::new();
        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 || err.path() == Some(dir) => {
                    return Err(io::Error::from(err));
                }
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                warn!(path = %entry.path().display(), "skipping entry with non UTF-8 name");
                continue;
            };

            let file_type = entry.file_type();
            let is_dir = if file_type.is_symlink() && self.options.follow_symlinks {
                match fs::metadata(entry.path()) {
                    Ok(target) => target.is_dir(),
                    Err(err) => {
                        warn!(
                            path = %entry.path().display(),
                            error = %err,
                            "skipping dangling link"
                        );
                        continue;
                    }
                }
            } else {
                file_type.is_dir()
            };

            children.push(Child {
                path: entry.into_path(),
                name,
                is_dir,
            });
        }
        Ok(children)
    }
}

impl<V: FileVisitor> DirectoryWalker for BreadthFirstDirectoryWalker<V> {
    fn set_includes<S: AsRef<str>>(&mut self, patterns: &[S]) -> Result<(), PatternError> {
        self.includes = PatternMatcherFactory::compile_all(true, self.case_sensitive, patterns)?;
        Ok(())
    }

    fn set_excludes<S: AsRef<str>>(&mut self, patterns: &[S]) -> Result<(), PatternError> {
        self.excludes = PatternMatcherFactory::compile_all(false, self.case_sensitive, patterns)?;
        Ok(())
    }

    fn start(&mut self, root: &Path) -> Result<WalkSummary, WalkError> {
        let span = span!(Level::DEBUG, "walk", root = %root.display());
        let _guard = span.enter();

        let mut summary = WalkSummary::default();
        let canonical = match fs::canonicalize(root) {
            Ok(path) => path,
            Err(err) => {
                info!("file or directory '{}' not found", root.display());
                debug!(error = %err, "root could not be resolved");
                return Ok(summary);
            }
        };
        summary.root_found = true;

        if canonical.is_file() {
            self.process_single_file(&canonical, &mut summary)?;
        } else {
            self.walk_tree(&canonical, &mut summary)?;
        }

        debug!(
            files = summary.files_visited,
            dirs = summary.dirs_visited,
            pruned = summary.dirs_pruned,
            unreadable = summary.unreadable.len(),
            "walk complete"
        );
        Ok(summary)
    }
}

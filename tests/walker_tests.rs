mod common;

use antwalk::RelativePath;
use antwalk::walker::{
    BreadthFirstDirectoryWalker, DirectoryWalker, FileVisitor, SelectionCollector,
    UnreadablePolicy, WalkError, WalkOptions,
};
use anyhow::Result;
use common::{TestTree, notifications};
use std::fs;
use std::path::{Path, PathBuf};

fn sorted() -> WalkOptions {
    WalkOptions {
        sort_entries: true,
        ..WalkOptions::default()
    }
}

fn sorted_walker() -> BreadthFirstDirectoryWalker<SelectionCollector> {
    BreadthFirstDirectoryWalker::new(true, SelectionCollector::new()).with_options(sorted())
}

#[test]
fn test_java_sources_without_tests() -> Result<()> {
    let tree = TestTree::with_files(&[
        "src/main/Foo.java",
        "src/test/FooTest.java",
        "build.gradle",
    ])?;

    let mut walker = sorted_walker();
    walker.set_includes(&["src/**"])?;
    walker.set_excludes(&["**/test/**"])?;
    let summary = walker.start(tree.path())?;

    assert_eq!(
        notifications(walker.visitor()),
        ["d:src", "d:src/main", "f:src/main/Foo.java"]
    );
    assert!(summary.root_found);
    assert_eq!(summary.files_visited, 1);
    assert_eq!(summary.dirs_visited, 2);
    assert_eq!(summary.dirs_pruned, 1);
    Ok(())
}

#[test]
fn test_excluded_directory_is_never_entered() -> Result<()> {
    let tree = TestTree::with_files(&[
        "keep/a.txt",
        "node_modules/pkg/index.js",
        "node_modules/x.js",
    ])?;

    let mut walker = sorted_walker();
    walker.set_excludes(&["node_modules"])?;
    walker.start(tree.path())?;

    let seen = notifications(walker.visitor());
    assert_eq!(seen, ["d:keep", "f:keep/a.txt"]);
    Ok(())
}

#[test]
fn test_breadth_first_depth_never_decreases() -> Result<()> {
    let tree = TestTree::with_files(&[
        "a/b/c/d.txt",
        "a/b/e.txt",
        "a/f.txt",
        "g/h/i.txt",
        "g/j.txt",
        "k.txt",
        "l/m/n/o/p.txt",
    ])?;

    // filesystem order: only the level ordering is guaranteed
    let mut walker = BreadthFirstDirectoryWalker::new(true, SelectionCollector::new());
    walker.start(tree.path())?;

    let depths: Vec<usize> = walker.visitor().entries().iter().map(|e| e.path.len()).collect();
    assert_eq!(depths.len(), 7 + 9);
    assert!(depths.windows(2).all(|w| w[0] <= w[1]), "depths {depths:?}");
    Ok(())
}

#[test]
fn test_siblings_notified_before_descent() -> Result<()> {
    let tree = TestTree::with_files(&["x/deep/1.txt", "y/2.txt", "z.txt"])?;

    let mut walker = sorted_walker();
    walker.start(tree.path())?;

    assert_eq!(
        notifications(walker.visitor()),
        ["f:z.txt", "d:x", "d:y", "d:x/deep", "f:y/2.txt", "f:x/deep/1.txt"]
    );
    Ok(())
}

#[test]
fn test_file_root_reports_single_file() -> Result<()> {
    let tree = TestTree::with_files(&["notes.txt"])?;
    let file = tree.path().join("notes.txt");

    let mut walker = sorted_walker();
    walker.set_includes(&["*.txt"])?;
    let summary = walker.start(&file)?;

    assert_eq!(notifications(walker.visitor()), ["f:notes.txt"]);
    let entry = &walker.visitor().entries()[0];
    assert!(entry.path.ends_with_file());
    assert_eq!(entry.location, fs::canonicalize(&file)?);
    assert_eq!(summary.dirs_visited, 0);
    Ok(())
}

#[test]
fn test_file_root_rejected_by_patterns() -> Result<()> {
    let tree = TestTree::with_files(&["notes.txt"])?;

    let mut walker = sorted_walker();
    walker.set_includes(&["*.md"])?;
    let summary = walker.start(&tree.path().join("notes.txt"))?;

    assert!(summary.root_found);
    assert_eq!(summary.total_visited(), 0);
    Ok(())
}

#[test]
fn test_missing_root_is_not_an_error() -> Result<()> {
    let tree = TestTree::new()?;
    let mut walker = sorted_walker();
    let summary = walker.start(&tree.path().join("nope"))?;

    assert!(!summary.root_found);
    assert!(walker.visitor().entries().is_empty());
    Ok(())
}

#[test]
fn test_empty_root_reports_nothing() -> Result<()> {
    let tree = TestTree::new()?;
    let mut walker = sorted_walker();
    let summary = walker.start(tree.path())?;

    assert!(summary.root_found);
    assert_eq!(summary.total_visited(), 0);
    Ok(())
}

#[test]
fn test_case_insensitive_walk() -> Result<()> {
    let tree = TestTree::with_files(&["Src/Main.JAVA", "src2/other.txt"])?;

    let mut walker = BreadthFirstDirectoryWalker::new(false, SelectionCollector::new())
        .with_options(sorted());
    walker.set_includes(&["src/**/*.java"])?;
    walker.start(tree.path())?;

    assert_eq!(notifications(walker.visitor()), ["d:Src", "f:Src/Main.JAVA"]);
    Ok(())
}

#[test]
fn test_borrowed_visitor() -> Result<()> {
    let tree = TestTree::with_files(&["a.txt"])?;
    let mut collector = SelectionCollector::new();

    {
        let mut walker = BreadthFirstDirectoryWalker::new(true, &mut collector);
        walker.start(tree.path())?;
    }

    assert_eq!(notifications(&collector), ["f:a.txt"]);
    Ok(())
}

/// Fails on the first file it sees.
struct FailingVisitor {
    calls: usize,
}

impl FileVisitor for FailingVisitor {
    fn visit_file(&mut self, _file: &Path, path: &RelativePath) -> Result<()> {
        self.calls += 1;
        anyhow::bail!("refusing {path}")
    }

    fn visit_dir(&mut self, _dir: &Path, _path: &RelativePath) -> Result<()> {
        self.calls += 1;
        Ok(())
    }
}

#[test]
fn test_visitor_error_stops_walk() -> Result<()> {
    let tree = TestTree::with_files(&["a.txt", "b.txt", "c/d.txt"])?;

    let mut walker = BreadthFirstDirectoryWalker::new(true, FailingVisitor { calls: 0 })
        .with_options(sorted());
    let err = walker.start(tree.path()).unwrap_err();

    assert!(matches!(err, WalkError::Visitor(_)));
    assert_eq!(err.to_string(), "refusing a.txt");
    assert_eq!(walker.visitor().calls, 1);
    Ok(())
}

/// Removes directories named `doomed` as soon as they are announced, so
/// listing them fails afterwards.
struct Saboteur {
    inner: SelectionCollector,
}

impl FileVisitor for Saboteur {
    fn visit_file(&mut self, file: &Path, path: &RelativePath) -> Result<()> {
        self.inner.visit_file(file, path)
    }

    fn visit_dir(&mut self, dir: &Path, path: &RelativePath) -> Result<()> {
        if path.last_name() == Some("doomed") {
            fs::remove_dir_all(dir)?;
        }
        self.inner.visit_dir(dir, path)
    }
}

fn saboteur_tree() -> Result<(TestTree, PathBuf)> {
    let tree = TestTree::with_files(&["doomed/lost.txt", "fine/kept.txt"])?;
    let doomed = fs::canonicalize(tree.path())?.join("doomed");
    Ok((tree, doomed))
}

#[test]
fn test_unreadable_directory_skipped() -> Result<()> {
    let (tree, doomed) = saboteur_tree()?;

    let mut walker = BreadthFirstDirectoryWalker::new(
        true,
        Saboteur {
            inner: SelectionCollector::new(),
        },
    )
    .with_options(sorted());
    let summary = walker.start(tree.path())?;

    assert_eq!(summary.unreadable, [doomed]);
    assert_eq!(
        notifications(&walker.visitor().inner),
        ["d:doomed", "d:fine", "f:fine/kept.txt"]
    );
    Ok(())
}

#[test]
fn test_unreadable_directory_aborts() -> Result<()> {
    let (tree, doomed) = saboteur_tree()?;

    let mut walker = BreadthFirstDirectoryWalker::new(
        true,
        Saboteur {
            inner: SelectionCollector::new(),
        },
    )
    .with_options(WalkOptions {
        on_unreadable: UnreadablePolicy::Abort,
        ..sorted()
    });

    match walker.start(tree.path()) {
        Err(WalkError::Unreadable { path, .. }) => assert_eq!(path, doomed),
        other => panic!("expected unreadable error, got {other:?}"),
    }
    Ok(())
}

#[cfg(unix)]
mod symlinks {
    use super::*;
    use std::os::unix::fs::symlink;

    #[test]
    fn test_link_is_a_file_when_not_following() -> Result<()> {
        let tree = TestTree::with_files(&["real/inside.txt"])?;
        symlink(tree.path().join("real"), tree.path().join("link"))?;

        let mut walker = sorted_walker();
        walker.start(tree.path())?;

        assert_eq!(
            notifications(walker.visitor()),
            ["f:link", "d:real", "f:real/inside.txt"]
        );
        Ok(())
    }

    #[test]
    fn test_link_is_walked_when_following() -> Result<()> {
        let tree = TestTree::with_files(&["real/inside.txt"])?;
        symlink(tree.path().join("real"), tree.path().join("link"))?;

        let mut walker = BreadthFirstDirectoryWalker::new(true, SelectionCollector::new())
            .with_options(WalkOptions {
                follow_symlinks: true,
                ..sorted()
            });
        walker.start(tree.path())?;

        // `real` is reached through `link` first, so it is not walked twice
        assert_eq!(
            notifications(walker.visitor()),
            ["d:link", "d:real", "f:link/inside.txt"]
        );
        Ok(())
    }

    #[test]
    fn test_cycle_is_not_descended() -> Result<()> {
        let tree = TestTree::with_files(&["a/file.txt"])?;
        symlink(tree.path(), tree.path().join("a/loop"))?;

        let mut walker = BreadthFirstDirectoryWalker::new(true, SelectionCollector::new())
            .with_options(WalkOptions {
                follow_symlinks: true,
                ..sorted()
            });
        walker.start(tree.path())?;

        assert_eq!(
            notifications(walker.visitor()),
            ["d:a", "f:a/file.txt", "d:a/loop"]
        );
        Ok(())
    }

    #[test]
    fn test_link_to_own_parent_is_reported() -> Result<()> {
        let tree = TestTree::with_files(&["a/file.txt"])?;
        symlink(tree.path().join("a"), tree.path().join("a/self"))?;
        symlink(tree.path().join("a"), tree.path().join("other"))?;

        let mut walker = BreadthFirstDirectoryWalker::new(true, SelectionCollector::new())
            .with_options(WalkOptions {
                follow_symlinks: true,
                ..sorted()
            });
        let summary = walker.start(tree.path())?;

        assert_eq!(
            notifications(walker.visitor()),
            ["d:a", "d:other", "f:a/file.txt", "d:a/self"]
        );
        assert_eq!(summary.dirs_visited, 3);
        assert!(summary.unreadable.is_empty());
        Ok(())
    }

    #[test]
    fn test_dangling_link_is_skipped_when_following() -> Result<()> {
        let tree = TestTree::with_files(&["kept.txt"])?;
        symlink(tree.path().join("gone"), tree.path().join("broken"))?;

        let mut walker = BreadthFirstDirectoryWalker::new(true, SelectionCollector::new())
            .with_options(WalkOptions {
                follow_symlinks: true,
                ..sorted()
            });
        walker.start(tree.path())?;

        assert_eq!(notifications(walker.visitor()), ["f:kept.txt"]);
        Ok(())
    }
}

#[cfg(target_os = "linux")]
#[test]
fn test_non_utf8_names_are_skipped() -> Result<()> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tree = TestTree::with_files(&["ok.txt"])?;
    fs::write(tree.path().join(OsStr::from_bytes(b"bad\xff.txt")), "")?;
    fs::write(tree.path().join(OsStr::from_bytes(b"bad\xfe.txt")), "")?;

    let mut walker = sorted_walker();
    let summary = walker.start(tree.path())?;

    assert_eq!(notifications(walker.visitor()), ["f:ok.txt"]);
    assert_eq!(summary.files_visited, 1);
    Ok(())
}

use crate::AntwalkContext;
use crate::cli::SelectArgs;
use crate::config::Config;
use crate::output;
use crate::utils::{display_entry, expand_tilde, thread_pool};
use crate::walker::{
    BreadthFirstDirectoryWalker, DirectoryWalker, EntryKind, SelectedEntry, SelectionCollector,
    UnreadablePolicy, WalkOptions, WalkSummary,
};
use anyhow::{Context, Result};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Everything needed to walk one root, resolved from config and flags.
#[derive(Debug, Clone)]
pub struct SelectPlan {
    /// Include patterns: the named set first, then `-i` patterns.
    pub includes: Vec<String>,
    /// Exclude patterns: the named set, `-e` patterns, then default excludes.
    pub excludes: Vec<String>,
    /// Case sensitivity of every matcher.
    pub case_sensitive: bool,
    /// Traversal options.
    pub options: WalkOptions,
}

impl SelectPlan {
    /// Merge configuration with command-line flags.
    ///
    /// # Errors
    ///
    /// Returns an error if `--set` names a set missing from the config.
    pub fn resolve(config: &Config, args: &SelectArgs) -> Result<Self> {
        let mut includes = Vec::new();
        let mut excludes = Vec::new();

        if let Some(name) = &args.set {
            let set = config
                .pattern_set(name)
                .with_context(|| format!("No pattern set named '{name}' in config"))?;
            includes.extend(set.includes.iter().cloned());
            excludes.extend(set.excludes.iter().cloned());
        }

        includes.extend(args.includes.iter().cloned());
        excludes.extend(args.excludes.iter().cloned());
        if !args.no_default_excludes {
            excludes.extend(config.walk.implicit_excludes());
        }

        let mut options = config.walk.walk_options();
        options.follow_symlinks |= args.follow_symlinks;
        if let Some(sort) = args.sort_override() {
            options.sort_entries = sort;
        }
        if args.fail_on_unreadable {
            options.on_unreadable = UnreadablePolicy::Abort;
        }

        Ok(Self {
            includes,
            excludes,
            case_sensitive: config.walk.case_sensitive && !args.ignore_case,
            options,
        })
    }

    /// Walk a single root with this plan.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern does not compile or the walk aborts.
    pub fn walk(&self, root: &Path) -> Result<RootSelection> {
        let mut walker =
            BreadthFirstDirectoryWalker::new(self.case_sensitive, SelectionCollector::new())
                .with_options(self.options.clone());
        walker
            .set_includes(&self.includes)
            .context("Invalid include pattern")?;
        walker
            .set_excludes(&self.excludes)
            .context("Invalid exclude pattern")?;

        let summary = walker
            .start(root)
            .with_context(|| format!("Failed to walk {}", root.display()))?;

        Ok(RootSelection {
            root: root.to_path_buf(),
            entries: walker.into_visitor().into_entries(),
            summary,
        })
    }
}

/// The outcome of walking one root.
#[derive(Debug, Clone)]
pub struct RootSelection {
    /// The root as given on the command line, after tilde expansion.
    pub root: PathBuf,
    /// Entries in visit order.
    pub entries: Vec<SelectedEntry>,
    /// Walk statistics.
    pub summary: WalkSummary,
}

impl RootSelection {
    /// Printable lines, honoring `--files-only`, `--dirs-only` and `--absolute`.
    #[must_use]
    pub fn render(&self, args: &SelectArgs) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| match e.kind {
                EntryKind::File => !args.dirs_only,
                EntryKind::Dir => !args.files_only,
            })
            .map(|e| display_entry(&e.location, &e.path, args.absolute))
            .collect()
    }
}

/// Execute the select command.
///
/// Roots are walked concurrently on the worker pool; output keeps the order
/// in which the roots were given.
///
/// # Errors
///
/// Returns an error if:
/// - `--set` names an unknown pattern set
/// - A pattern does not compile
/// - A walk aborts (visitor failure or unreadable directory with
///   `--fail-on-unreadable`)
/// - Writing to stdout fails
pub fn execute(ctx: &AntwalkContext, args: &SelectArgs) -> Result<()> {
    let plan = SelectPlan::resolve(&ctx.config, args)?;
    debug!(
        includes = plan.includes.len(),
        excludes = plan.excludes.len(),
        case_sensitive = plan.case_sensitive,
        "resolved selection plan"
    );

    let roots = args
        .roots
        .iter()
        .map(|r| expand_tilde(&r.to_string_lossy()))
        .collect::<Result<Vec<_>>>()?;

    let results = thread_pool::map_ordered(&roots, |root| plan.walk(root))?;

    let separator = if args.null { '\0' } else { '\n' };
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for result in results {
        let selection = result?;
        let root_label = selection.root.display().to_string();
        if !selection.summary.root_found {
            output::warning(&format!("{root_label}: no such file or directory"));
            continue;
        }
        for line in selection.render(args) {
            write!(out, "{line}{separator}")?;
        }
        output::walk_summary(&root_label, &selection.summary);
    }

    out.flush()?;
    Ok(())
}

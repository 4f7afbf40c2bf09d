//! Recursive disk usage accumulation.
//!
//! This module provides the core traversal: a depth-first walk that sums the
//! sizes of every file below a directory, streams a subtotal record for each
//! subdirectory at a permitted depth, and counts what it saw along the way.
//! Output for a subdirectory is emitted only after its whole subtree has been
//! summed, so records appear in post-order, in the source's enumeration order.

use std::path::Path;

use crate::{
    config::{DepthBudget, WalkOptions},
    error::WalkError,
    output::DirectorySink,
    source::{EntryKind, EntrySource},
    utils::round_up,
};

/// Files and directories classified during a walk.
///
/// The root directory itself is not counted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Number of files seen across the whole tree
    pub files: u64,

    /// Number of subdirectories seen across the whole tree
    pub directories: u64,
}

/// Depth-first directory walker.
///
/// The walker owns the run's [`RunCounters`]; they start at zero and keep
/// accumulating across calls to [`DirectoryWalker::walk`].
#[derive(Debug)]
pub struct DirectoryWalker<S> {
    source: S,
    options: WalkOptions,
    counters: RunCounters,
}

impl<S: EntrySource> DirectoryWalker<S> {
    /// Create a walker that lists directories through `source`.
    #[must_use]
    pub fn new(source: S, options: WalkOptions) -> Self {
        Self {
            source,
            options,
            counters: RunCounters::default(),
        }
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn counters(&self) -> RunCounters {
        self.counters
    }

    /// Sum the sizes of everything below `path`.
    ///
    /// Each subdirectory's subtotal is sent to `sink` when `budget` permits
    /// output at its parent's level. A directory that cannot be listed
    /// (missing, not a directory, permission denied) contributes `0` and is
    /// otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WalkError::TraversalTooDeep`] if the tree is deeper than
    /// the configured recursion limit, or [`WalkError::Output`] if the sink
    /// fails to write a record.
    pub fn walk(
        &mut self,
        path: &Path,
        budget: DepthBudget,
        sink: &mut impl DirectorySink,
    ) -> Result<u64, WalkError> {
        self.walk_dir(path, budget, sink, 0)
    }

    fn walk_dir(
        &mut self,
        path: &Path,
        budget: DepthBudget,
        sink: &mut impl DirectorySink,
        depth: usize,
    ) -> Result<u64, WalkError> {
        let children = match self.source.list_children(path) {
            Ok(children) => children,
            Err(err) => {
                if self.options.verbose {
                    crate::warn(&format!("Cannot read {}: {err}", path.display()));
                }
                return Ok(0);
            }
        };

        let mut total = 0u64;

        for child in children {
            if child.name == "." || child.name == ".." {
                continue;
            }

            let size = match child.kind {
                EntryKind::Directory => {
                    if depth >= self.options.max_recursion {
                        return Err(WalkError::TraversalTooDeep {
                            path: child.path,
                            limit: self.options.max_recursion,
                        });
                    }

                    let subtotal = self.walk_dir(&child.path, budget.next(), sink, depth + 1)?;
                    if budget.prints() {
                        sink.record(&child.path, subtotal)?;
                    }
                    self.counters.directories += 1;
                    subtotal
                }
                EntryKind::File => {
                    self.counters.files += 1;
                    self.options
                        .cluster
                        .map_or(child.len, |unit| round_up(child.len, unit))
                }
            };

            total = total.saturating_add(size);
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClusterSize;
    use crate::source::DirectoryEntry;
    use std::{
        collections::HashMap,
        io,
        path::PathBuf,
    };

    /// In-memory tree: directory path -> children in listing order.
    #[derive(Default)]
    struct MemorySource {
        dirs: HashMap<PathBuf, Vec<DirectoryEntry>>,
    }

    impl MemorySource {
        fn dir(mut self, path: &str) -> Self {
            self.dirs.entry(PathBuf::from(path)).or_default();
            // Directories report a non-zero entry size, as real media do.
            self.attach(path, EntryKind::Directory, 4096)
        }

        fn file(self, path: &str, len: u64) -> Self {
            self.attach(path, EntryKind::File, len)
        }

        fn attach(mut self, path: &str, kind: EntryKind, len: u64) -> Self {
            let path = PathBuf::from(path);
            if let Some(parent) = path.parent() {
                let entry = DirectoryEntry {
                    name: path.file_name().unwrap().to_os_string(),
                    path: path.clone(),
                    kind,
                    len,
                };
                self.dirs.entry(parent.to_path_buf()).or_default().push(entry);
            }
            self
        }
    }

    impl EntrySource for MemorySource {
        fn list_children(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
            self.dirs
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
    }

    #[derive(Default)]
    struct Recorded(Vec<(PathBuf, u64)>);

    impl DirectorySink for Recorded {
        fn record(&mut self, path: &Path, size: u64) -> io::Result<()> {
            self.0.push((path.to_path_buf(), size));
            Ok(())
        }
    }

    fn sample_tree() -> MemorySource {
        MemorySource::default()
            .dir("/r")
            .file("/r/z.txt", 100)
            .dir("/r/b")
            .file("/r/b/one", 10)
            .dir("/r/b/deep")
            .file("/r/b/deep/two", 20)
            .dir("/r/a")
            .file("/r/a/three", 5)
            .dir("/r/empty")
    }

    fn run(source: MemorySource, budget: DepthBudget) -> (u64, Vec<(PathBuf, u64)>, RunCounters) {
        let mut walker = DirectoryWalker::new(source, WalkOptions::default());
        let mut sink = Recorded::default();
        let total = walker.walk(Path::new("/r"), budget, &mut sink).unwrap();
        (total, sink.0, walker.counters())
    }

    #[test]
    fn test_total_is_sum_of_children() {
        let (total, _, _) = run(sample_tree(), DepthBudget::Unlimited);
        assert_eq!(total, 100 + 10 + 20 + 5);
    }

    #[test]
    fn test_records_follow_enumeration_order_post_order() {
        let (_, records, _) = run(sample_tree(), DepthBudget::Unlimited);

        assert_eq!(
            records,
            vec![
                (PathBuf::from("/r/b/deep"), 20),
                (PathBuf::from("/r/b"), 30),
                (PathBuf::from("/r/a"), 5),
                (PathBuf::from("/r/empty"), 0),
            ]
        );
    }

    #[test]
    fn test_budget_zero_prints_nothing_but_sums_everything() {
        let (total, records, counters) = run(sample_tree(), DepthBudget::Levels(0));

        assert!(records.is_empty());
        assert_eq!(total, 135);
        assert_eq!(counters, RunCounters { files: 4, directories: 4 });
    }

    #[test]
    fn test_budget_one_prints_immediate_children_only() {
        let (total, records, _) = run(sample_tree(), DepthBudget::Levels(1));

        let paths: Vec<_> = records.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/r/b"),
                PathBuf::from("/r/a"),
                PathBuf::from("/r/empty"),
            ]
        );
        assert_eq!(total, 135);
    }

    #[test]
    fn test_counters_ignore_display_suppression() {
        for budget in [DepthBudget::Unlimited, DepthBudget::Levels(0), DepthBudget::Levels(1)] {
            let (_, _, counters) = run(sample_tree(), budget);
            assert_eq!(counters, RunCounters { files: 4, directories: 4 });
        }
    }

    #[test]
    fn test_missing_root_yields_zero() {
        let source = MemorySource::default();
        let mut walker = DirectoryWalker::new(source, WalkOptions::default());
        let mut sink = Recorded::default();

        let total = walker
            .walk(Path::new("/nowhere"), DepthBudget::Unlimited, &mut sink)
            .unwrap();

        assert_eq!(total, 0);
        assert!(sink.0.is_empty());
        assert_eq!(walker.counters(), RunCounters::default());
    }

    #[test]
    fn test_unlistable_subdirectory_contributes_zero() {
        // "/r/ghost" is announced by its parent but cannot be listed.
        let source = MemorySource::default()
            .dir("/r")
            .file("/r/f", 7)
            .attach("/r/ghost", EntryKind::Directory, 4096);

        let (total, records, counters) = run(source, DepthBudget::Unlimited);

        assert_eq!(total, 7);
        assert_eq!(records, vec![(PathBuf::from("/r/ghost"), 0)]);
        assert_eq!(counters, RunCounters { files: 1, directories: 1 });
    }

    #[test]
    fn test_empty_directories_contribute_nothing() {
        let source = MemorySource::default().dir("/r").dir("/r/sub").dir("/r/sub/inner");

        let (total, records, _) = run(source, DepthBudget::Unlimited);

        assert_eq!(total, 0);
        assert!(records.iter().all(|(_, size)| *size == 0));
    }

    #[test]
    fn test_pseudo_entries_are_skipped() {
        let mut source = MemorySource::default().dir("/r");
        let pseudo = [".", ".."].map(|name| DirectoryEntry {
            name: name.into(),
            path: PathBuf::from("/r").join(name),
            kind: EntryKind::Directory,
            len: 0,
        });
        source.dirs.get_mut(Path::new("/r")).unwrap().extend(pseudo);
        let source = source.file("/r/real", 3);

        let (total, records, counters) = run(source, DepthBudget::Unlimited);

        assert_eq!(total, 3);
        assert!(records.is_empty());
        assert_eq!(counters, RunCounters { files: 1, directories: 0 });
    }

    #[test]
    fn test_cluster_rounding() {
        let source = MemorySource::default()
            .dir("/r")
            .file("/r/a", 10)
            .file("/r/b", 40_000)
            .dir("/r/sub")
            .file("/r/sub/c", 5);
        let options = WalkOptions {
            cluster: ClusterSize::new(32_768),
            ..WalkOptions::default()
        };

        let mut walker = DirectoryWalker::new(source, options);
        let mut sink = Recorded::default();
        let total = walker
            .walk(Path::new("/r"), DepthBudget::Unlimited, &mut sink)
            .unwrap();

        assert_eq!(total, 131_072);
        assert_eq!(sink.0, vec![(PathBuf::from("/r/sub"), 32_768)]);
        assert_eq!(walker.counters(), RunCounters { files: 3, directories: 1 });
    }

    #[test]
    fn test_recursion_guard() {
        let mut source = MemorySource::default().dir("/r");
        let mut path = String::from("/r");
        for level in 0..5 {
            path.push_str(&format!("/d{level}"));
            source = source.dir(&path);
        }

        let options = WalkOptions {
            max_recursion: 3,
            ..WalkOptions::default()
        };
        let mut walker = DirectoryWalker::new(source, options);
        let mut sink = Recorded::default();

        let err = walker
            .walk(Path::new("/r"), DepthBudget::Unlimited, &mut sink)
            .unwrap_err();

        assert!(matches!(err, WalkError::TraversalTooDeep { limit: 3, .. }));
    }

    #[test]
    fn test_recursion_guard_allows_tree_at_limit() {
        let mut source = MemorySource::default().dir("/r");
        let mut path = String::from("/r");
        for level in 0..3 {
            path.push_str(&format!("/d{level}"));
            source = source.dir(&path);
        }
        source = source.file(&format!("{path}/leaf"), 9);

        let options = WalkOptions {
            max_recursion: 3,
            ..WalkOptions::default()
        };
        let mut walker = DirectoryWalker::new(source, options);
        let mut sink = Recorded::default();

        let total = walker
            .walk(Path::new("/r"), DepthBudget::Unlimited, &mut sink)
            .unwrap();
        assert_eq!(total, 9);
        assert_eq!(sink.0.len(), 3);
    }

    #[test]
    fn test_sink_errors_abort_the_walk() {
        struct Broken;
        impl DirectorySink for Broken {
            fn record(&mut self, _: &Path, _: u64) -> io::Result<()> {
                Err(io::Error::from(io::ErrorKind::BrokenPipe))
            }
        }

        let mut walker = DirectoryWalker::new(sample_tree(), WalkOptions::default());
        let err = walker
            .walk(Path::new("/r"), DepthBudget::Unlimited, &mut Broken)
            .unwrap_err();

        assert!(matches!(err, WalkError::Output(_)));
    }
}

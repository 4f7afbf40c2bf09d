//! Directory enumeration.
//!
//! The walker never touches the filesystem directly; it asks an
//! [`EntrySource`] for the direct children of a directory. [`FsEntrySource`]
//! is the real implementation, other sources can be plugged in for tests.

use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

/// Kind of a directory child, as far as the walker cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One direct child of a directory.
#[derive(Clone, Debug)]
pub struct DirectoryEntry {
    /// File name of the child
    pub name: OsString,

    /// Full path: the listed directory joined with `name`
    pub path: PathBuf,

    /// File or directory
    pub kind: EntryKind,

    /// Raw byte length reported by the medium (only meaningful for files)
    pub len: u64,
}

/// Something that can list the direct children of a directory.
///
/// Implementations must yield children in the medium's native enumeration
/// order and must not include the `.` and `..` pseudo-entries.
pub trait EntrySource {
    /// List the direct children of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist, is not a directory, or
    /// cannot be read.
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>>;
}

/// Lists children from the real filesystem using `walkdir`.
///
/// Symbolic links are not followed: a link is reported as a file whose
/// length is the link's own size, so cycles cannot occur.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsEntrySource {
    verbose: bool,
}

impl FsEntrySource {
    #[must_use]
    pub const fn new() -> Self {
        Self { verbose: false }
    }

    /// Report children whose metadata cannot be read on stderr.
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl EntrySource for FsEntrySource {
    fn list_children(&self, path: &Path) -> io::Result<Vec<DirectoryEntry>> {
        if !path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", path.display()),
            ));
        }

        let mut children = Vec::new();

        for entry in WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Failure to open the directory itself.
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    if self.verbose {
                        crate::warn(&format!("Skipping entry: {err}"));
                    }
                    continue;
                }
            };

            let kind = if entry.file_type().is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            let len = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    if self.verbose {
                        crate::warn(&format!(
                            "Skipping {}: {err}",
                            entry.path().display()
                        ));
                    }
                    continue;
                }
            };

            children.push(DirectoryEntry {
                name: entry.file_name().to_os_string(),
                path: entry.into_path(),
                kind,
                len,
            });
        }

        Ok(children)
    }
}

//! # dirsum
//!
//! Disk usage reporting for a directory tree.
//!
//! The library walks a directory depth-first, sums the size of every file
//! below it (optionally rounded up to the volume's allocation unit), and
//! streams one subtotal line per subdirectory as soon as that subdirectory
//! has been fully measured.
//!
//! The binary wraps this with argument parsing, path resolution, a TOML
//! configuration file and a JSON report mode.

use colored::Colorize;

pub mod config;
pub mod error;
pub mod output;
pub mod paths;
pub mod source;
pub mod utils;
pub mod volume;
pub mod walker;

pub use config::{ClusterSize, DepthBudget, WalkOptions};
pub use error::{DuError, WalkError};
pub use source::{DirectoryEntry, EntryKind, EntrySource, FsEntrySource};
pub use walker::{DirectoryWalker, RunCounters};

/// Print a yellow warning to stderr.
pub(crate) fn warn(message: &str) {
    eprintln!("{} {message}", "Warning:".yellow());
}

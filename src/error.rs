//! Typed errors surfaced by the library.
//!
//! Most failures during a walk are recovered locally (an unreadable directory
//! simply contributes nothing), so only the conditions that abort a run are
//! represented here.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while preparing a run, before any traversal happens.
#[derive(Debug, Error)]
pub enum DuError {
    #[error("Specified path is too long ({len} bytes, limit is {max})")]
    PathTooLong { len: usize, max: usize },

    #[error("Could not determine the current directory: {0}")]
    CurrentDir(#[from] io::Error),
}

/// Errors that abort a directory walk.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("Directory tree under {} is deeper than {limit} levels", path.display())]
    TraversalTooDeep { path: PathBuf, limit: usize },

    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),
}

//! Resolution of the user-supplied target path.
//!
//! The walker always works on an absolute, normalized path so the lines it
//! prints are unambiguous. The normalization here is purely lexical: `.` and
//! `..` are folded away without touching the filesystem.

use std::path::{Component, MAIN_SEPARATOR_STR, Path, PathBuf};

use crate::{config::file::expand_tilde, error::DuError};

/// Longest resolved path accepted, in bytes.
#[cfg(windows)]
pub const MAX_PATH_LEN: usize = 260;

/// Longest resolved path accepted, in bytes.
#[cfg(not(windows))]
pub const MAX_PATH_LEN: usize = 4096;

/// Turn `arg` into a normalized absolute path, relative to `cwd`.
///
/// A leading `~` is expanded to the home directory. Relative paths are joined
/// onto `cwd`; absolute ones (including drive-qualified paths on Windows)
/// replace it, following [`Path::join`] semantics. Any trailing separator is
/// dropped.
///
/// # Errors
///
/// Returns [`DuError::PathTooLong`] if the resolved path exceeds
/// [`MAX_PATH_LEN`].
pub fn resolve_to_absolute(arg: &Path, cwd: &Path) -> Result<PathBuf, DuError> {
    let resolved = normalize(&cwd.join(expand_tilde(arg)));

    let len = resolved.as_os_str().len();
    if len > MAX_PATH_LEN {
        return Err(DuError::PathTooLong {
            len,
            max: MAX_PATH_LEN,
        });
    }

    Ok(resolved)
}

/// Resolve `arg` against the process's current directory.
///
/// # Errors
///
/// Returns [`DuError::CurrentDir`] if the current directory is unavailable,
/// or [`DuError::PathTooLong`] as for [`resolve_to_absolute`].
pub fn resolve_from_current_dir(arg: &Path) -> Result<PathBuf, DuError> {
    let cwd = std::env::current_dir()?;
    resolve_to_absolute(arg, &cwd)
}

/// Fold `.` and `..` components without consulting the filesystem.
///
/// `..` never climbs above the root. A drive prefix without a root
/// (`C:TEST`) is anchored at the root of that drive.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => {
                out.push(prefix.as_os_str());
                out.push(MAIN_SEPARATOR_STR);
            }
            Component::RootDir => {
                if !out.has_root() {
                    out.push(component.as_os_str());
                }
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    out
}

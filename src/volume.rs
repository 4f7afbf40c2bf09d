//! Allocation unit discovery for the volume holding the target directory.

use std::{io, path::Path};

use crate::config::ClusterSize;

/// Query the allocation unit size of the volume that holds `path`.
///
/// On Unix this is the filesystem's preferred block size for the target
/// (`st_blksize`). Other platforms report [`ClusterSize::FALLBACK`].
///
/// # Errors
///
/// Returns an error if the metadata of `path` cannot be read, or if the
/// filesystem reports a block size of zero.
#[cfg(unix)]
pub fn allocation_unit_size(path: &Path) -> io::Result<ClusterSize> {
    use std::os::unix::fs::MetadataExt;

    let blksize = std::fs::metadata(path)?.blksize();
    ClusterSize::new(blksize).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} reports a zero block size", path.display()),
        )
    })
}

/// Query the allocation unit size of the volume that holds `path`.
///
/// # Errors
///
/// Returns an error if the metadata of `path` cannot be read.
#[cfg(not(unix))]
pub fn allocation_unit_size(path: &Path) -> io::Result<ClusterSize> {
    std::fs::metadata(path)?;
    Ok(ClusterSize::FALLBACK)
}

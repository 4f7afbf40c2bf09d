//! Report rendering.
//!
//! The walker hands every directory subtotal it is allowed to show to a
//! [`DirectorySink`]. [`TextSink`] streams `<size>\t<path>` lines straight to
//! a writer as the walk progresses; [`JsonSink`] collects them so the whole
//! run can be emitted as a single JSON object when `--json` is passed.
//! [`Report`] renders the grand total and counters once the walk is done.

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use humansize::{DECIMAL, format_size as format_decimal};
use serde::Serialize;

use crate::{config::ClusterSize, utils::format_size, walker::RunCounters};

/// Receiver for per-directory subtotals produced during a walk.
pub trait DirectorySink {
    /// Accept the subtotal of the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written out.
    fn record(&mut self, path: &Path, size: u64) -> io::Result<()>;
}

/// Streams formatted report lines to a writer.
#[derive(Debug)]
pub struct TextSink<W> {
    out: W,
    human: bool,
}

impl<W: Write> TextSink<W> {
    #[must_use]
    pub const fn new(out: W, human: bool) -> Self {
        Self { out, human }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DirectorySink for TextSink<W> {
    fn record(&mut self, path: &Path, size: u64) -> io::Result<()> {
        writeln!(
            self.out,
            "{}{}",
            format_size(size, self.human),
            path.display()
        )
    }
}

/// Collects directory records for the JSON report.
#[derive(Debug, Default)]
pub struct JsonSink {
    directories: Vec<JsonDirectoryEntry>,
}

impl JsonSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records collected so far, in emission order.
    #[must_use]
    pub fn directories(&self) -> &[JsonDirectoryEntry] {
        &self.directories
    }

    #[must_use]
    pub fn into_directories(self) -> Vec<JsonDirectoryEntry> {
        self.directories
    }
}

impl DirectorySink for JsonSink {
    fn record(&mut self, path: &Path, size: u64) -> io::Result<()> {
        self.directories.push(JsonDirectoryEntry {
            path: path.display().to_string(),
            size,
            size_formatted: format_decimal(size, DECIMAL),
        });
        Ok(())
    }
}

/// Final figures of a run, rendered after the walk completes.
#[derive(Clone, Debug)]
pub struct Report {
    /// Absolute path of the directory that was walked
    pub root: PathBuf,

    /// Grand total in bytes
    pub total: u64,

    /// Files and directories seen
    pub counters: RunCounters,

    /// Allocation unit used for rounding, when rounding was enabled
    pub cluster: Option<ClusterSize>,
}

impl Report {
    /// Write the grand total and counter lines.
    ///
    /// ```text
    /// 131072      	.
    /// 3 files scanned, 1 directories
    /// Disk cluster size is 32768
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn write_text(&self, out: &mut impl Write, human: bool) -> io::Result<()> {
        writeln!(out, "{}.", format_size(self.total, human))?;
        writeln!(
            out,
            "{} files scanned, {} directories",
            self.counters.files, self.counters.directories
        )?;
        if let Some(cluster) = self.cluster {
            writeln!(out, "Disk cluster size is {cluster}")?;
        }
        Ok(())
    }

    /// Build the JSON document for this report.
    #[must_use]
    pub fn to_json(&self, directories: Vec<JsonDirectoryEntry>) -> JsonOutput {
        JsonOutput {
            root: self.root.display().to_string(),
            directories,
            summary: JsonSummary {
                total_size: self.total,
                total_size_formatted: format_decimal(self.total, DECIMAL),
                files: self.counters.files,
                directories: self.counters.directories,
                cluster_size: self.cluster.map(ClusterSize::get),
            },
        }
    }

    /// Write the JSON document for this report, followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing to `out` fails, for
    /// example when the reader of a pipe has gone away.
    pub fn write_json(
        &self,
        out: &mut impl Write,
        directories: Vec<JsonDirectoryEntry>,
    ) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, &self.to_json(directories))?;
        writeln!(out)
    }
}

/// Top-level JSON output emitted when `--json` is active.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Absolute path of the walked directory.
    pub root: String,

    /// Directory subtotals, in the order the walker produced them.
    pub directories: Vec<JsonDirectoryEntry>,

    /// Grand total and counters.
    pub summary: JsonSummary,
}

/// A single directory subtotal in the JSON output.
#[derive(Clone, Debug, Serialize)]
pub struct JsonDirectoryEntry {
    /// Full path of the directory.
    pub path: String,

    /// Subtree size in bytes.
    pub size: u64,

    /// Human-readable formatted size (e.g. `"1.23 GB"`).
    pub size_formatted: String,
}

/// Aggregated figures for the whole run.
#[derive(Debug, Serialize)]
pub struct JsonSummary {
    /// Grand total in bytes.
    pub total_size: u64,

    /// Human-readable formatted total.
    pub total_size_formatted: String,

    /// Number of files scanned.
    pub files: u64,

    /// Number of directories scanned (excluding the root).
    pub directories: u64,

    /// Allocation unit used for rounding, or `null` when sizes are raw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_size: Option<u64>,
}

//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments using the
//! [clap](https://docs.rs/clap/) library and resolves them against the
//! configuration file.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use dirsum::config::file::{FileConfig, expand_tilde};
use dirsum::config::{ClusterSize, DEFAULT_MAX_RECURSION, DepthBudget};
use dirsum::utils::parse_cluster_size;

/// Command-line arguments controlling what gets printed.
#[derive(Parser)]
struct DisplayArgs {
    /// Use human readable sizes (B, k, M, G, T; base 1000)
    #[arg(short = 'H', long)]
    human: bool,

    /// Display the root and its first-level subdirectories only
    #[arg(short = 'S', long, conflicts_with = "only")]
    summary: bool,

    /// Display the summary of only the specified directory
    #[arg(short = 'O', long)]
    only: bool,

    /// Output results as a single JSON object for scripting/piping
    #[arg(long)]
    json: bool,
}

/// Command-line arguments controlling the walk itself.
#[derive(Parser)]
struct WalkArgs {
    /// Display the size on disk rather than the actual file size
    ///
    /// File sizes are rounded up to the allocation unit of the volume, which
    /// is queried from the filesystem unless `--cluster-size` is given.
    #[arg(short = 'D', long)]
    disk_size: bool,

    /// Allocation unit to round to, e.g. 4096, 4KiB or 32KB
    #[arg(long, value_name = "SIZE")]
    cluster_size: Option<String>,

    /// Give up on trees deeper than this many levels
    #[arg(long, value_name = "LEVELS")]
    max_recursion: Option<usize>,

    /// Warn about directories that cannot be read
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// How file sizes are rounded for this run.
#[derive(Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Report raw file lengths
    Off,

    /// Round to an explicitly configured unit
    Fixed(ClusterSize),

    /// Round to the unit reported by the target volume
    Volume,
}

/// Main command-line interface structure.
#[derive(Parser)]
#[command(name = "dirsum")]
#[command(about = "List the disk usage of a directory and its subdirectories")]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directory to measure (defaults to the current directory)
    ///
    /// A directory literally named `config` is read as the subcommand; pass
    /// it as `./config` instead.
    path: Option<PathBuf>,

    /// Display options
    #[command(flatten)]
    display: DisplayArgs,

    /// Walk options
    #[command(flatten)]
    walk: WalkArgs,
}

impl Cli {
    /// Resolve the target directory from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `dir` > current directory (`.`).
    /// Tilde expansion is applied to paths originating from the config file.
    #[must_use]
    pub fn directory(&self, config: &FileConfig) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }

        config
            .dir
            .as_deref()
            .map_or_else(|| PathBuf::from("."), expand_tilde)
    }

    /// Depth budget selected by `--summary` (1 level) / `--only` (0 levels).
    #[must_use]
    pub fn depth_budget(&self) -> DepthBudget {
        let levels = if self.display.only {
            0
        } else if self.display.summary {
            1
        } else {
            -1
        };
        DepthBudget::from_levels(levels)
    }

    /// Whether sizes are printed in human-readable form.
    #[must_use]
    pub fn human(&self, config: &FileConfig) -> bool {
        self.display.human || config.display.human.unwrap_or(false)
    }

    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub fn json(&self, config: &FileConfig) -> bool {
        self.display.json || config.display.json.unwrap_or(false)
    }

    /// Whether unreadable directories are reported.
    #[must_use]
    pub fn verbose(&self, config: &FileConfig) -> bool {
        self.walk.verbose || config.walk.verbose.unwrap_or(false)
    }

    /// Recursion guard: CLI > config > default.
    #[must_use]
    pub fn max_recursion(&self, config: &FileConfig) -> usize {
        self.walk
            .max_recursion
            .or(config.walk.max_recursion)
            .unwrap_or(DEFAULT_MAX_RECURSION)
    }

    /// Decide how file sizes are rounded.
    ///
    /// Rounding is enabled by `--disk-size` or `walk.disk_size`. The unit
    /// comes from `--cluster-size`, then `walk.cluster_size`, and is otherwise
    /// left to be queried from the volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured cluster size cannot be parsed.
    pub fn rounding(&self, config: &FileConfig) -> Result<Rounding> {
        if !(self.walk.disk_size || config.walk.disk_size.unwrap_or(false)) {
            return Ok(Rounding::Off);
        }

        match self
            .walk
            .cluster_size
            .as_deref()
            .or(config.walk.cluster_size.as_deref())
        {
            Some(size) => Ok(Rounding::Fixed(parse_cluster_size(size)?)),
            None => Ok(Rounding::Volume),
        }
    }
}

//! # dirsum
//!
//! A simple disk usage utility that lists the size of the files contained
//! within a directory and all of its subdirectories.
//!
//! The first column shows the size, the second the full path of the
//! directory. Subdirectories are listed depth-first in directory order, and a
//! summary of the requested directory is printed at the end.
//!
//! ## Usage
//!
//! ```bash
//! # Every subdirectory of the current directory
//! dirsum
//!
//! # First-level subdirectories only, human-readable sizes
//! dirsum -S -H ~/Projects
//!
//! # Size on disk (rounded to the allocation unit) of one directory
//! dirsum -O -D /var/log
//! ```

mod cli;

use std::io::{self, Write};
use std::process::exit;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand, Rounding};
use colored::Colorize;
use dirsum::{
    ClusterSize, DirectoryWalker, FsEntrySource, WalkOptions,
    config::FileConfig,
    output::{JsonSink, Report, TextSink},
    paths::resolve_from_current_dir,
    volume::allocation_unit_size,
};

/// Entry point for the dirsum application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("Error: {err}");

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, resolves the target path and allocation unit, walks the
/// tree while streaming directory lines, then prints the summary.
///
/// # Errors
///
/// Returns errors for an over-long path, an invalid cluster size, a tree
/// deeper than the recursion guard, or a failure writing to stdout.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config();

    let root = resolve_from_current_dir(&args.directory(&file_config))?;
    let verbose = args.verbose(&file_config);
    let cluster = match args.rounding(&file_config)? {
        Rounding::Off => None,
        Rounding::Fixed(cluster) => Some(cluster),
        Rounding::Volume => Some(query_cluster_size(&root, verbose)),
    };

    let options = WalkOptions {
        cluster,
        max_recursion: args.max_recursion(&file_config),
        verbose,
    };
    let source = FsEntrySource::new().with_verbose(verbose);
    let mut walker = DirectoryWalker::new(source, options);
    let budget = args.depth_budget();
    let human = args.human(&file_config);

    if args.json(&file_config) {
        let mut sink = JsonSink::new();
        let total = walker.walk(&root, budget, &mut sink)?;
        let report = Report {
            root,
            total,
            counters: walker.counters(),
            cluster,
        };
        let mut out = io::stdout().lock();
        report.write_json(&mut out, sink.into_directories())?;
        out.flush()?;
        return Ok(());
    }

    let mut sink = TextSink::new(io::stdout().lock(), human);
    let total = walker.walk(&root, budget, &mut sink)?;
    let mut out = sink.into_inner();

    Report {
        root,
        total,
        counters: walker.counters(),
        cluster,
    }
    .write_text(&mut out, human)?;
    out.flush()?;

    Ok(())
}

/// Ask the volume for its allocation unit, falling back to 4 KiB.
fn query_cluster_size(root: &std::path::Path, verbose: bool) -> ClusterSize {
    allocation_unit_size(root).unwrap_or_else(|e| {
        if verbose {
            eprintln!(
                "{} {e}; assuming {} bytes",
                "Warning: Could not query the cluster size:".yellow(),
                ClusterSize::FALLBACK
            );
        }
        ClusterSize::FALLBACK
    })
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# dirsum configuration
# All values shown are their defaults. Uncomment and change as needed.

# Default directory to measure (defaults to current directory when not set)
# dir = "."

[display]
# Use human readable sizes (B, k, M, G, T; base 1000)
# human = false

# Emit a single JSON document instead of text lines
# json = false

[walk]
# Round file sizes up to the allocation unit of the volume
# disk_size = false

# Allocation unit to round to (queried from the volume when not set)
# cluster_size = "4KiB"

# Give up on trees deeper than this many levels
# max_recursion = 1024

# Warn about directories that cannot be read
# verbose = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let dir = config.dir.as_ref().map_or_else(
        || "\".\"  (default)".to_string(),
        |p| format!("\"{}\"", p.display()),
    );
    let cluster_size = config.walk.cluster_size.as_deref().map_or_else(
        || "(from volume)  (default)".to_string(),
        |v| format!("\"{v}\""),
    );
    let max_recursion = config.walk.max_recursion.map_or_else(
        || format!("{}  (default)", dirsum::config::DEFAULT_MAX_RECURSION),
        |v| v.to_string(),
    );

    format!(
        "\
dir           = {dir}

[display]
human         = {human}
json          = {json}

[walk]
disk_size     = {disk_size}
cluster_size  = {cluster_size}
max_recursion = {max_recursion}
verbose       = {verbose}",
        human = show_bool(config.display.human, false),
        json = show_bool(config.display.json, false),
        disk_size = show_bool(config.walk.disk_size, false),
        verbose = show_bool(config.walk.verbose, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config() -> FileConfig {
    FileConfig::load().unwrap_or_else(|e| {
        eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
        FileConfig::default()
    })
}

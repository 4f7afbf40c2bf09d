//! Configuration types for a disk usage run.
//!
//! - [`walk`] holds the options the walker consumes at runtime.
//! - [`file`] maps the optional TOML configuration file.

pub mod file;
pub mod walk;

pub use file::FileConfig;
pub use walk::{ClusterSize, DEFAULT_MAX_RECURSION, DepthBudget, WalkOptions};

//! Utility functions and helpers.
//!
//! This module contains the pure size helpers used throughout the application:
//! cluster rounding, report formatting and cluster-size parsing.

pub mod size;

pub use size::{format_size, parse_cluster_size, round_up};

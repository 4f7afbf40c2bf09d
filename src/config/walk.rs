//! Traversal configuration for the directory walker.
//!
//! This module defines the options that control how the walker descends into
//! a directory tree, how far it prints, and whether file sizes are rounded up
//! to the allocation unit of the underlying volume.

use std::{fmt, num::NonZeroU64};

/// Default recursion guard, in directory levels below the root.
pub const DEFAULT_MAX_RECURSION: usize = 1024;

/// Allocation unit size (in bytes) of the storage medium being measured.
///
/// Guaranteed non-zero so rounding never divides by zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClusterSize(NonZeroU64);

impl ClusterSize {
    /// Allocation unit assumed when the volume cannot be queried.
    pub const FALLBACK: Self = Self(NonZeroU64::new(4096).unwrap());

    /// Create a cluster size, returning `None` for zero.
    #[must_use]
    pub const fn new(bytes: u64) -> Option<Self> {
        match NonZeroU64::new(bytes) {
            Some(bytes) => Some(Self(bytes)),
            None => None,
        }
    }

    /// The cluster size in bytes.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ClusterSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How many more directory levels may print their subtotal lines.
///
/// The walker checks [`DepthBudget::prints`] on the budget of the *current*
/// frame before handing [`DepthBudget::next`] to the child frame, so a
/// budget of `Levels(1)` prints the root's immediate subdirectories and
/// nothing below them, while `Levels(0)` prints nothing at all. Totals are
/// always computed over the whole tree regardless of the budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DepthBudget {
    /// Print every directory at every depth.
    #[default]
    Unlimited,

    /// Print directories for this many more levels.
    Levels(u32),
}

impl DepthBudget {
    /// Map a signed level count onto a budget; negative means unlimited.
    #[must_use]
    pub fn from_levels(levels: i64) -> Self {
        u32::try_from(levels).map_or(Self::Unlimited, Self::Levels)
    }

    /// Budget handed to a subdirectory's frame.
    ///
    /// Positive budgets shrink by one; `Unlimited` and an exhausted
    /// `Levels(0)` pass through unchanged.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Levels(n) if n > 0 => Self::Levels(n - 1),
            other => other,
        }
    }

    /// Whether directory lines are emitted at this level.
    #[must_use]
    pub const fn prints(self) -> bool {
        !matches!(self, Self::Levels(0))
    }
}

/// Configuration for one directory walk.
#[derive(Clone, Debug)]
pub struct WalkOptions {
    /// Round file sizes up to this allocation unit (`None` = report raw lengths)
    pub cluster: Option<ClusterSize>,

    /// Maximum number of directory levels to descend before giving up
    pub max_recursion: usize,

    /// Print a warning for every directory that cannot be listed
    pub verbose: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            cluster: None,
            max_recursion: DEFAULT_MAX_RECURSION,
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_size_rejects_zero() {
        assert!(ClusterSize::new(0).is_none());
        assert_eq!(ClusterSize::new(512).map(ClusterSize::get), Some(512));
        assert_eq!(ClusterSize::FALLBACK.get(), 4096);
    }

    #[test]
    fn test_cluster_size_display() {
        let cluster = ClusterSize::new(32_768).unwrap();
        assert_eq!(cluster.to_string(), "32768");
    }

    #[test]
    fn test_depth_budget_from_levels() {
        assert_eq!(DepthBudget::from_levels(-1), DepthBudget::Unlimited);
        assert_eq!(DepthBudget::from_levels(0), DepthBudget::Levels(0));
        assert_eq!(DepthBudget::from_levels(1), DepthBudget::Levels(1));
    }

    #[test]
    fn test_depth_budget_next() {
        assert_eq!(DepthBudget::Unlimited.next(), DepthBudget::Unlimited);
        assert_eq!(DepthBudget::Levels(0).next(), DepthBudget::Levels(0));
        assert_eq!(DepthBudget::Levels(1).next(), DepthBudget::Levels(0));
        assert_eq!(DepthBudget::Levels(3).next(), DepthBudget::Levels(2));
    }

    #[test]
    fn test_depth_budget_prints() {
        assert!(DepthBudget::Unlimited.prints());
        assert!(DepthBudget::Levels(1).prints());
        assert!(!DepthBudget::Levels(0).prints());
        assert!(!DepthBudget::Levels(1).next().prints());
    }

    #[test]
    fn test_walk_options_default() {
        let options = WalkOptions::default();

        assert!(options.cluster.is_none());
        assert_eq!(options.max_recursion, DEFAULT_MAX_RECURSION);
        assert!(!options.verbose);
    }
}

//! Size rounding, formatting and parsing utilities.
//!
//! This module provides the two pure functions the walker leans on for every
//! entry it visits: rounding a byte count up to the allocation unit of the
//! volume, and rendering a byte count for the report. It also parses
//! user-supplied cluster sizes such as `"32KiB"`.

use anyhow::Result;

use crate::config::ClusterSize;

/// Suffixes for the human-readable scale, one per factor of 1000.
const HUMAN_SUFFIXES: [char; 5] = ['B', 'k', 'M', 'G', 'T'];

/// Round a byte count up to the next multiple of the allocation unit.
///
/// Computes `ceil(size / unit) * unit`. A zero-length file occupies zero
/// clusters here, even though real media usually reserve one for it.
/// Sizes within one unit of `u64::MAX` saturate to the largest multiple
/// that still fits.
#[must_use]
pub const fn round_up(size: u64, unit: ClusterSize) -> u64 {
    let unit = unit.get();
    let clusters = size.div_ceil(unit);

    match clusters.checked_mul(unit) {
        Some(rounded) => rounded,
        None => (u64::MAX / unit) * unit,
    }
}

/// Render a byte count as the size column of a report line.
///
/// The returned string ends with a tab; the caller appends the path.
///
/// - Plain mode left-justifies the decimal number in a 12-character field.
/// - Human mode divides by 1000 (truncating) while the value is strictly
///   greater than 1000 and appends one of `B`, `k`, `M`, `G`, `T`. No
///   fraction is ever shown, so `1001` becomes `1k` and `1000` stays `1000B`.
///
/// # Examples
///
/// ```
/// # use dirsum::utils::format_size;
/// assert_eq!(format_size(0, false), "0           \t");
/// assert_eq!(format_size(1001, true), "1k\t");
/// ```
#[must_use]
pub fn format_size(size: u64, human: bool) -> String {
    if !human {
        return format!("{size:<12}\t");
    }

    let mut value = size;
    let mut level = 0;
    while value > 1000 && level < HUMAN_SUFFIXES.len() - 1 {
        value /= 1000;
        level += 1;
    }

    format!("{value}{}\t", HUMAN_SUFFIXES[level])
}

/// Parse a cluster size such as `"4096"`, `"4KiB"` or `"32kb"`.
///
/// Units are matched case-insensitively: `B`, `KB`, `MB` (base 1000) and
/// `KiB`, `MiB` (base 1024). Allocation units are whole byte counts, so
/// decimals are rejected.
///
/// # Errors
///
/// Returns an error if the number is missing or malformed, the unit is
/// unknown, the value overflows `u64`, or the resulting size is zero.
pub fn parse_cluster_size(input: &str) -> Result<ClusterSize> {
    const UNITS: &[(&str, u64)] = &[
        ("MIB", 1_048_576),
        ("KIB", 1_024),
        ("MB", 1_000_000),
        ("KB", 1_000),
        ("B", 1),
    ];

    let upper = input.trim().to_uppercase();
    let (number, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, multiplier)| {
            upper
                .strip_suffix(suffix)
                .map(|number| (number.trim_end(), *multiplier))
        })
        .unwrap_or((upper.as_str(), 1));

    if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
        anyhow::bail!("Invalid cluster size: {input}");
    }

    let bytes = number
        .parse::<u64>()?
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Cluster size overflow: {input}"))?;

    ClusterSize::new(bytes).ok_or_else(|| anyhow::anyhow!("Cluster size must be non-zero"))
}

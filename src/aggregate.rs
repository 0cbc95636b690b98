//! Cross-sectional aggregation of a path ensemble
//!
//! Reduces every day index of the ensemble to nearest-rank percentiles,
//! the values of two outlier paths and a handful of sampled paths.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Percentile levels reported per day
pub const P5: f64 = 0.05;
pub const P25: f64 = 0.25;
pub const P50: f64 = 0.50;
pub const P75: f64 = 0.75;
pub const P95: f64 = 0.95;

/// Nearest-rank percentile of an ascending slice
///
/// Reads index `floor(len * q)` clamped to `[0, len - 1]`; no interpolation.
///
/// # Panics
/// Panics if `sorted` is empty
///
/// # Example
/// ```
/// use price_forecast::aggregate::nearest_rank;
///
/// let sorted = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(nearest_rank(&sorted, 0.5), 3.0);
/// assert_eq!(nearest_rank(&sorted, 1.0), 4.0);
/// ```
pub fn nearest_rank(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    // float-to-int casts saturate: negative or NaN reads index 0
    let idx = ((sorted.len() as f64 * q).floor() as usize).min(last);
    sorted[idx]
}

/// Summary of one day's cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAggregate {
    /// Days after the last historical price
    pub day: usize,
    /// Median (nearest rank)
    pub median: f64,
    /// 5th percentile (nearest rank)
    pub p5: f64,
    /// 25th percentile (nearest rank)
    pub p25: f64,
    /// 75th percentile (nearest rank)
    pub p75: f64,
    /// 95th percentile (nearest rank)
    pub p95: f64,
    /// Value on the path with the lowest terminal price
    pub outlier_min: f64,
    /// Value on the path with the highest terminal price
    pub outlier_max: f64,
    /// Values of the sampled representative paths
    pub samples: Vec<f64>,
}

impl DayAggregate {
    /// Width of the 5th–95th percentile band
    pub fn band_width(&self) -> f64 {
        self.p95 - self.p5
    }

    /// Width of the interquartile band
    pub fn interquartile_range(&self) -> f64 {
        self.p75 - self.p25
    }
}

/// Indices of the ensemble's terminal minimum and maximum paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlierPaths {
    pub min: usize,
    pub max: usize,
}

impl OutlierPaths {
    /// Finds the paths with the lowest and highest terminal price
    ///
    /// The first path wins ties. Returns `None` for an empty ensemble.
    pub fn from_paths(paths: &[Vec<f64>]) -> Option<Self> {
        if paths.is_empty() {
            return None;
        }
        let terminal = |i: usize| paths[i].last().copied().unwrap_or(f64::NAN);

        let mut outliers = Self { min: 0, max: 0 };
        for i in 1..paths.len() {
            if terminal(i) < terminal(outliers.min) {
                outliers.min = i;
            }
            if terminal(i) > terminal(outliers.max) {
                outliers.max = i;
            }
        }
        Some(outliers)
    }
}

/// Aggregates one day index of the ensemble
fn aggregate_day(
    paths: &[Vec<f64>],
    day: usize,
    outliers: OutlierPaths,
    sample_indices: &[usize],
) -> DayAggregate {
    let mut cross_section: Vec<f64> = paths.iter().map(|p| p[day]).collect();
    cross_section.sort_by(f64::total_cmp);

    DayAggregate {
        day,
        median: nearest_rank(&cross_section, P50),
        p5: nearest_rank(&cross_section, P5),
        p25: nearest_rank(&cross_section, P25),
        p75: nearest_rank(&cross_section, P75),
        p95: nearest_rank(&cross_section, P95),
        outlier_min: paths[outliers.min][day],
        outlier_max: paths[outliers.max][day],
        samples: sample_indices.iter().map(|&i| paths[i][day]).collect(),
    }
}

/// Aggregates every day index of an ensemble
///
/// All paths must have the same length. The output is ordered by day
/// regardless of `parallel`.
///
/// # Arguments
/// * `paths` - Non-empty ensemble of equal-length paths
/// * `outliers` - Outlier path indices from [`OutlierPaths::from_paths`]
/// * `sample_indices` - Indices of paths to report individually
/// * `parallel` - Aggregate days on the rayon thread pool
pub fn aggregate(
    paths: &[Vec<f64>],
    outliers: OutlierPaths,
    sample_indices: &[usize],
    parallel: bool,
) -> Vec<DayAggregate> {
    let days = paths.first().map_or(0, Vec::len);

    if parallel {
        (0..days)
            .into_par_iter()
            .map(|day| aggregate_day(paths, day, outliers, sample_indices))
            .collect()
    } else {
        (0..days)
            .map(|day| aggregate_day(paths, day, outliers, sample_indices))
            .collect()
    }
}

//! Per-column descriptive statistics

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::histogram::Histogram;
use crate::model::{Column, Table};
use crate::select::select_nth_f64;

/// Report format version
pub const SUMMARY_VERSION: u32 = 1;

/// Default number of histogram bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 16;

const LARGE_MAGNITUDE: f64 = 1e150;

/// Statistics for a single column.
///
/// `min`, `max`, `median`, `mean` and `std_dev` only consider finite values
/// and are all 0 when the column has none. `median` is the upper of the two
/// middle values for an even count and `std_dev` is the population standard
/// deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub mean: f64,
    pub std_dev: f64,
    pub nan_count: usize,
    pub inf_count: usize,
    pub histogram: String,
}

/// Statistics for a whole table, keyed by column name in table order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub version: u32,
    pub row_count: usize,
    pub columns: IndexMap<String, ColumnStats>,
}

/// Computes [`SummaryReport`]s
#[derive(Debug, Clone, Copy)]
pub struct SummaryEngine {
    histogram_bins: usize,
}

impl Default for SummaryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_HISTOGRAM_BINS)
    }
}

impl SummaryEngine {
    /// Create an engine rendering `histogram_bins` glyphs per column (at least 1)
    pub fn new(histogram_bins: usize) -> Self {
        Self {
            histogram_bins: histogram_bins.max(1),
        }
    }

    pub fn histogram_bins(&self) -> usize {
        self.histogram_bins
    }

    /// Summarize every column of `table`
    pub fn summarize(&self, table: &Table) -> SummaryReport {
        let columns: IndexMap<String, ColumnStats> = table
            .columns()
            .iter()
            .map(|column| (column.name().to_string(), self.summarize_column(column)))
            .collect();

        info!(
            rows = table.row_count(),
            columns = columns.len(),
            "summary computed"
        );

        SummaryReport {
            version: SUMMARY_VERSION,
            row_count: table.row_count(),
            columns,
        }
    }

    /// Summarize one column
    pub fn summarize_column(&self, column: &Column) -> ColumnStats {
        let stats = self.column_stats(column.f64_values());
        debug!(
            column = column.name(),
            kind = %column.kind(),
            nan = stats.nan_count,
            inf = stats.inf_count,
            "column summarized"
        );
        stats
    }

    /// Statistics over an arbitrary stream of values
    pub fn column_stats<I>(&self, values: I) -> ColumnStats
    where
        I: IntoIterator<Item = f64>,
    {
        let mut finite = Vec::new();
        let mut nan_count = 0;
        let mut inf_count = 0;
        for v in values {
            if v.is_nan() {
                nan_count += 1;
            } else if v.is_infinite() {
                inf_count += 1;
            } else {
                finite.push(v);
            }
        }

        if finite.is_empty() {
            return ColumnStats {
                min: 0.0,
                max: 0.0,
                median: 0.0,
                mean: 0.0,
                std_dev: 0.0,
                nan_count,
                inf_count,
                histogram: self.render_histogram(&finite, 0.0, 0.0),
            };
        }

        let (min, max) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        // Power-of-two scale keeps squared deviations finite and is exact
        let scale = if min.abs().max(max.abs()) > LARGE_MAGNITUDE {
            2f64.powi(-600)
        } else {
            1.0
        };

        // Welford's running mean / sum of squared deviations
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for (i, &v) in finite.iter().enumerate() {
            let v = v * scale;
            let delta = v - mean;
            mean += delta / (i + 1) as f64;
            m2 += delta * (v - mean);
        }
        let std_dev = (m2 / finite.len() as f64).sqrt() / scale;
        let mean = mean / scale;

        let histogram = self.render_histogram(&finite, min, max);

        let rank = finite.len() / 2;
        let median = select_nth_f64(&mut finite, rank).unwrap_or(0.0);

        ColumnStats {
            min,
            max,
            median,
            mean,
            std_dev,
            nan_count,
            inf_count,
            histogram,
        }
    }

    fn render_histogram(&self, finite: &[f64], min: f64, max: f64) -> String {
        Histogram::from_values(finite.iter().copied(), self.histogram_bins, min, max).render()
    }
}

/// Summarize `table` with default settings
pub fn compute_summary(table: &Table) -> SummaryReport {
    SummaryEngine::default().summarize(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_one_to_five() {
        let stats = SummaryEngine::default().column_stats([1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.median, 3.0);
        assert!(approx(stats.mean, 3.0));
        assert!(approx(stats.std_dev, 2.0f64.sqrt()));
        assert_eq!(SummaryEngine::default().histogram_bins(), DEFAULT_HISTOGRAM_BINS);
        assert_eq!(stats.nan_count, 0);
        assert_eq!(stats.inf_count, 0);
        assert_eq!(stats.histogram.chars().count(), DEFAULT_HISTOGRAM_BINS);
    }

    #[test]
    fn test_even_count_takes_upper_middle() {
        let stats = SummaryEngine::default().column_stats([4.0, 1.0, 3.0, 2.0]);
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_non_finite_excluded() {
        let stats = SummaryEngine::new(4).column_stats([
            f64::NAN,
            1.0,
            f64::INFINITY,
            3.0,
            f64::NEG_INFINITY,
            f64::NAN,
        ]);
        assert_eq!(stats.nan_count, 2);
        assert_eq!(stats.inf_count, 2);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 3.0);
        assert_eq!(stats.std_dev, 1.0);
    }

    #[test]
    fn test_no_finite_values() {
        let stats = SummaryEngine::new(3).column_stats([f64::NAN, f64::INFINITY]);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.median, 0.0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.histogram, "   ");
    }

    #[test]
    fn test_extreme_finite_range() {
        let stats = SummaryEngine::new(4).column_stats([-1e308, 1e308]);
        assert_eq!(stats.min, -1e308);
        assert_eq!(stats.max, 1e308);
        assert_eq!(stats.mean, 0.0);
        assert!((stats.std_dev / 1e308 - 1.0).abs() < 1e-12);
        assert_eq!(stats.histogram, "█  █");

        let stats = SummaryEngine::new(2).column_stats([f64::MAX, f64::MAX, f64::MAX]);
        assert_eq!(stats.mean, f64::MAX);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_constant_column() {
        let stats = SummaryEngine::new(8).column_stats([2.5; 10]);
        assert_eq!(stats.min, 2.5);
        assert_eq!(stats.max, 2.5);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.histogram, "█       ");
    }
}

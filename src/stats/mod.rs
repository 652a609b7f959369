//! Column statistics and histograms

mod histogram;
mod summary;

pub use histogram::{Histogram, BARS};
pub use summary::{
    compute_summary, ColumnStats, SummaryEngine, SummaryReport, DEFAULT_HISTOGRAM_BINS,
    SUMMARY_VERSION,
};

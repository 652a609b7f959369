//! splatstat - in-memory data engine for Gaussian splat point clouds
//!
//! A typed columnar [`Table`], a balanced [`KdTree`] over its rows for
//! nearest-neighbor queries, and a [`SummaryEngine`] producing per-column
//! statistics with glyph histograms.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;
pub mod select;
pub mod spatial;
pub mod stats;
pub mod writer;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{Column, ColumnKind, Table};
pub use spatial::{Aabb, KdTree, Nearest};
pub use stats::{compute_summary, ColumnStats, SummaryEngine, SummaryReport};

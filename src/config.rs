//! Configuration handling for splatstat

use std::path::PathBuf;

use crate::stats::DEFAULT_HISTOGRAM_BINS;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for a summary / query run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the input table
    pub input: PathBuf,
    /// Output format
    pub output_format: OutputFormat,
    /// Number of histogram bins per column
    pub histogram_bins: usize,
    /// Columns interpreted as point coordinates
    pub coordinate_columns: Vec<String>,
    /// Columns dropped right after loading
    pub drop_columns: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_format: OutputFormat::default(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            coordinate_columns: vec!["x".to_string(), "y".to_string(), "z".to_string()],
            drop_columns: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new Config for an input file
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set the number of histogram bins
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Set coordinate columns; an empty list keeps the default
    pub fn with_coordinate_columns(mut self, columns: Vec<String>) -> Self {
        if !columns.is_empty() {
            self.coordinate_columns = columns;
        }
        self
    }

    /// Set columns to drop after loading
    pub fn with_drop_columns(mut self, columns: Vec<String>) -> Self {
        self.drop_columns = columns;
        self
    }
}

//! splatstat - statistics and nearest-neighbor queries for splat point tables

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rustc_hash::FxHashSet;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use splatstat::config::{Config, OutputFormat};
use splatstat::output::render_to_stdout;
use splatstat::parser::ParserFactory;
use splatstat::spatial::{Aabb, KdTree};
use splatstat::stats::SummaryEngine;
use splatstat::writer::write_csv_file;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Column statistics and spatial queries for Gaussian splat tables
#[derive(Parser, Debug)]
#[command(name = "splatstat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level filter (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Per-column statistics with histograms
    Summary {
        /// Input table
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: CliOutputFormat,

        /// Number of histogram bins
        #[arg(long, default_value_t = splatstat::stats::DEFAULT_HISTOGRAM_BINS)]
        bins: usize,

        /// Column(s) to drop before summarizing (comma-separated)
        #[arg(long, value_delimiter = ',')]
        drop: Vec<String>,
    },

    /// Find the row closest to a point
    Nearest {
        /// Input table
        file: PathBuf,

        /// Query point (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        point: Vec<f64>,

        /// Coordinate columns (comma-separated, default x,y,z)
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Row indices to skip (comma-separated)
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<usize>,
    },

    /// Bounding box of the coordinate columns
    Bounds {
        /// Input table
        file: PathBuf,

        /// Coordinate columns (comma-separated, default x,y,z)
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,

        /// Restrict to these row indices (comma-separated, default all rows)
        #[arg(long, value_delimiter = ',')]
        rows: Vec<usize>,
    },

    /// Write the table back out as CSV
    Export {
        /// Input table
        file: PathBuf,

        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,

        /// Column(s) to drop before writing (comma-separated)
        #[arg(long, value_delimiter = ',')]
        drop: Vec<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn run(command: Command) -> Result<()> {
    let factory = ParserFactory::new();

    match command {
        Command::Summary {
            file,
            format,
            bins,
            drop,
        } => {
            let config = Config::new(file)
                .with_output_format(format.into())
                .with_histogram_bins(bins)
                .with_drop_columns(drop);
            let table = load(&factory, &config)?;
            let report = SummaryEngine::new(config.histogram_bins).summarize(&table);
            render_to_stdout(&report, &config.input, config.output_format)
        }
        Command::Nearest {
            file,
            point,
            columns,
            exclude,
        } => {
            let config = Config::new(file).with_coordinate_columns(columns);
            let table = load(&factory, &config)?;
            let tree = KdTree::build(&table, config.coordinate_columns.as_slice())
                .context("Failed to build spatial index")?;

            let excluded: FxHashSet<usize> = exclude.into_iter().collect();
            let nearest = tree
                .find_nearest_filtered(&point, |row| !excluded.contains(&row))
                .context("Nearest-neighbor query failed")?;

            match nearest.index {
                Some(index) => {
                    println!(
                        "Nearest: row {} (distance {:.6}, squared {:.6}, {} of {} nodes visited)",
                        index,
                        nearest.distance_sq.sqrt(),
                        nearest.distance_sq,
                        nearest.visited,
                        tree.len()
                    );
                    for (name, value) in table.row(index)? {
                        println!("  {}: {}", name, value);
                    }
                }
                None => println!("Nearest: none ({} nodes visited)", nearest.visited),
            }
            Ok(())
        }
        Command::Bounds {
            file,
            columns,
            rows,
        } => {
            let config = Config::new(file).with_coordinate_columns(columns);
            let table = load(&factory, &config)?;
            let indices: Vec<usize> = if rows.is_empty() {
                (0..table.row_count()).collect()
            } else {
                rows
            };

            let aabb = Aabb::from_rows(&table, config.coordinate_columns.as_slice(), &indices)?;
            if indices.is_empty() {
                println!("Bounds: empty (no rows)");
                return Ok(());
            }

            println!("Bounds over {} rows:", indices.len());
            for (axis, name) in config.coordinate_columns.iter().enumerate() {
                if aabb.min[axis] > aabb.max[axis] {
                    println!("  {}: no values (all NaN)", name);
                    continue;
                }
                println!(
                    "  {}: [{}, {}] extent {}",
                    name,
                    aabb.min[axis],
                    aabb.max[axis],
                    aabb.extent(axis).unwrap_or(0.0)
                );
            }
            match (aabb.largest_axis(), aabb.largest_extent()) {
                (Some(axis), Some(extent)) if extent >= 0.0 => println!(
                    "Largest axis: {} (extent {})",
                    config.coordinate_columns[axis], extent
                ),
                _ => {}
            }
            Ok(())
        }
        Command::Export { file, output, drop } => {
            let config = Config::new(file).with_drop_columns(drop);
            let table = load(&factory, &config)?;
            if table.column_count() == 0 {
                bail!("Nothing to export: every column was dropped");
            }
            write_csv_file(&table, &output)?;
            println!(
                "Wrote {} rows x {} columns to {}",
                table.row_count(),
                table.column_count(),
                output.display()
            );
            Ok(())
        }
    }
}

fn load(factory: &ParserFactory, config: &Config) -> Result<splatstat::Table> {
    factory
        .load(config)
        .with_context(|| format!("Failed to load {}", config.input.display()))
}

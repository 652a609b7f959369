//! CSV file parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::model::{Column, ColumnData, ColumnKind, Table};

use super::Parser;

/// Parser for CSV files.
///
/// The header row names the columns. A header may carry an explicit kind as
/// `name:kind` (for example `red:uint8`); otherwise the kind is inferred:
/// columns whose cells are all integers fitting `i32` become `int32`, all
/// others `float64`. Empty cells read as NaN.
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> Result<Table> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        parse_csv(BufReader::new(file))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "txt")
    }
}

/// Column being accumulated while reading
struct ColumnBuilder {
    name: String,
    forced_kind: Option<ColumnKind>,
    values: Vec<f64>,
    all_int32: bool,
}

impl ColumnBuilder {
    fn from_header(header: &str) -> Result<Self> {
        let (name, forced_kind) = match header.rsplit_once(':') {
            Some((name, kind)) => {
                let kind = kind
                    .parse::<ColumnKind>()
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("Invalid column header '{}'", header))?;
                (name.trim(), Some(kind))
            }
            None => (header.trim(), None),
        };
        Ok(Self {
            name: name.to_string(),
            forced_kind,
            values: Vec::new(),
            all_int32: true,
        })
    }

    fn push(&mut self, cell: &str, line: u64) -> Result<()> {
        let text = cell.trim();
        let value = if text.is_empty() {
            f64::NAN
        } else {
            text.parse::<f64>().with_context(|| {
                format!("Line {}: invalid number '{}' in column '{}'", line, text, self.name)
            })?
        };

        if let Some(kind) = self.forced_kind {
            if kind.is_integer() && !value.is_finite() {
                bail!(
                    "Line {}: cannot store '{}' in {} column '{}'",
                    line,
                    text,
                    kind,
                    self.name
                );
            }
        }

        self.all_int32 = self.all_int32 && text.parse::<i32>().is_ok();
        self.values.push(value);
        Ok(())
    }

    fn finish(self) -> Column {
        let kind = self.forced_kind.unwrap_or(if self.all_int32 && !self.values.is_empty() {
            ColumnKind::Int32
        } else {
            ColumnKind::Float64
        });
        Column::new(self.name, ColumnData::from_f64_values(kind, &self.values))
    }
}

/// Read a table from any CSV source
pub fn parse_csv<R: Read>(reader: R) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("Failed to read CSV headers")?
        .clone();

    let mut builders = headers
        .iter()
        .map(ColumnBuilder::from_header)
        .collect::<Result<Vec<_>>>()?;

    for (row_num, result) in csv_reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read CSV row {}", row_num + 1))?;
        // quoted fields may span lines
        let line = record.position().map_or(row_num as u64 + 2, |p| p.line());

        if record.len() != builders.len() {
            bail!(
                "Line {}: expected {} fields, found {}",
                line,
                builders.len(),
                record.len()
            );
        }

        for (builder, cell) in builders.iter_mut().zip(record.iter()) {
            builder.push(cell, line)?;
        }
    }

    let columns: Vec<Column> = builders.into_iter().map(ColumnBuilder::finish).collect();
    let table = Table::new(columns).context("Invalid table")?;
    debug!(
        rows = table.row_count(),
        columns = table.column_count(),
        "parsed CSV"
    );
    Ok(table)
}

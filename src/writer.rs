//! CSV writer for tables

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::model::Table;

/// Write `table` as CSV: a header of column names, then one line per row
/// with every cell stringified through [`Table::value_at`].
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(table.column_names())
        .context("Failed to write CSV header")?;

    let mut record = Vec::with_capacity(table.column_count());
    for row in 0..table.row_count() {
        record.clear();
        for col in 0..table.column_count() {
            record.push(table.value_at::<String>(row, col)?);
        }
        csv_writer
            .write_record(&record)
            .with_context(|| format!("Failed to write CSV row {}", row))?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write `table` to a CSV file at `path`
pub fn write_csv_file(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    write_csv(table, BufWriter::new(file))?;
    debug!(path = %path.display(), rows = table.row_count(), "wrote CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::parser::CsvParser;
    use crate::parser::Parser;

    fn sample() -> Table {
        Table::new(vec![
            Column::new("x", vec![0.5f32, -1.0]),
            Column::new("red", vec![255u8, 0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_writes_header_and_rows() {
        let mut out = Vec::new();
        write_csv(&sample(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x,red\n0.5,255\n-1,0\n");
    }

    #[test]
    fn test_file_can_be_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv_file(&sample(), &path).unwrap();

        let table = CsvParser.parse(&path).unwrap();
        assert_eq!(table.column_names(), vec!["x", "red"]);
        assert_eq!(table.value_at::<f64>(1, 0).unwrap(), -1.0);
        assert_eq!(table.value_at::<u8>(0, 1).unwrap(), 255);
    }
}

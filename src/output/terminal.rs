//! Box-drawn terminal output

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::stats::{ColumnStats, SummaryReport};

use super::OutputFormatter;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Terminal output
pub struct TerminalOutput {
    precision: usize,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { precision: 4 }
    }

    /// Number of decimals printed for float statistics
    pub fn with_precision(precision: usize) -> Self {
        Self { precision }
    }

    fn write_header(&self, writer: &mut dyn Write, source: &Path, report: &SummaryReport) -> Result<()> {
        writeln!(writer, "{}", RULE)?;
        writeln!(
            writer,
            " splatstat: {} ({} rows, {} columns, report v{})",
            source.display(),
            report.row_count,
            report.columns.len(),
            report.version
        )?;
        writeln!(writer, "{}", RULE)?;
        writeln!(writer)?;
        Ok(())
    }

    fn stats_row(&self, name: &str, stats: &ColumnStats) -> Vec<String> {
        let p = self.precision;
        vec![
            name.to_string(),
            format!("{:.p$}", stats.min),
            format!("{:.p$}", stats.max),
            format!("{:.p$}", stats.median),
            format!("{:.p$}", stats.mean),
            format!("{:.p$}", stats.std_dev),
            stats.nan_count.to_string(),
            stats.inf_count.to_string(),
            stats.histogram.clone(),
        ]
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, report: &SummaryReport, source: &Path, writer: &mut dyn Write) -> Result<()> {
        self.write_header(writer, source, report)?;

        if report.columns.is_empty() {
            writeln!(writer, "No columns.")?;
            return Ok(());
        }

        let mut table_data: Vec<Vec<String>> = Vec::with_capacity(report.columns.len() + 1);
        table_data.push(
            ["column", "min", "max", "median", "mean", "std dev", "nan", "inf", "histogram"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
        );
        for (name, stats) in &report.columns {
            table_data.push(self.stats_row(name, stats));
        }

        writeln!(writer, "{}", build_table(&table_data))?;
        Ok(())
    }
}

/// Build a formatted table from data; the first row is the header
fn build_table(data: &[Vec<String>]) -> String {
    if data.is_empty() || data[0].is_empty() {
        return String::new();
    }

    let col_count = data[0].len();

    // Widths in chars, histogram glyphs are multi-byte
    let mut col_widths: Vec<usize> = vec![0; col_count];
    for row in data {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }
    }

    let border = |left: char, mid: char, right: char| {
        let mut line = String::new();
        line.push(left);
        for (i, width) in col_widths.iter().enumerate() {
            line.push_str(&"─".repeat(*width + 2));
            if i < col_widths.len() - 1 {
                line.push(mid);
            }
        }
        line.push(right);
        line.push('\n');
        line
    };

    let row_line = |row: &[String]| {
        let mut line = String::from("│");
        for (i, cell) in row.iter().enumerate() {
            let width = col_widths.get(i).copied().unwrap_or(0);
            line.push_str(&format!(" {:width$} │", cell, width = width));
        }
        line.push('\n');
        line
    };

    let mut output = border('┌', '┬', '┐');
    output.push_str(&row_line(&data[0]));
    output.push_str(&border('├', '┼', '┤'));
    for row in data.iter().skip(1) {
        output.push_str(&row_line(row));
    }
    output.push_str(&border('└', '┴', '┘'));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Table};
    use crate::stats::SummaryEngine;

    #[test]
    fn test_renders_one_line_per_column() {
        let table = Table::new(vec![
            Column::new("opacity", vec![0.1f32, 0.9, 0.5]),
            Column::new("red", vec![1u8, 2, 3]),
        ])
        .unwrap();
        let report = SummaryEngine::new(4).summarize(&table);

        let mut out = Vec::new();
        TerminalOutput::with_precision(2)
            .render(&report, Path::new("cloud.csv"), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("cloud.csv (3 rows, 2 columns, report v1)"));
        assert!(text.contains("│ opacity │"));
        assert!(text.contains("│ red     │ 1.00 │ 3.00 │"));
        assert!(text.contains("histogram"));
    }

    #[test]
    fn test_build_table_aligns_multibyte_cells() {
        let data = vec![
            vec!["h".to_string(), "bar".to_string()],
            vec!["a".to_string(), "█▁".to_string()],
        ];
        let rendered = build_table(&data);
        let widths: Vec<usize> = rendered.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}

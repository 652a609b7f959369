//! JSON output format

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::stats::SummaryReport;

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonSummaryOutput<'a> {
    source: String,
    #[serde(flatten)]
    report: &'a SummaryReport,
}

impl OutputFormatter for JsonOutput {
    fn render(&self, report: &SummaryReport, source: &Path, writer: &mut dyn Write) -> Result<()> {
        let output = JsonSummaryOutput {
            source: source.display().to_string(),
            report,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, Table};
    use crate::stats::compute_summary;

    #[test]
    fn test_json_keeps_column_order() {
        let table = Table::new(vec![
            Column::new("z", vec![1.0f32, 2.0]),
            Column::new("a", vec![3i8, 4]),
        ])
        .unwrap();
        let report = compute_summary(&table);

        let mut out = Vec::new();
        JsonOutput::compact()
            .render(&report, Path::new("points.csv"), &mut out)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["source"], "points.csv");
        assert_eq!(value["version"], 1);
        assert_eq!(value["row_count"], 2);
        assert_eq!(value["columns"]["a"]["max"], 4.0);

        let text = String::from_utf8(out).unwrap();
        assert!(text.find("\"z\"").unwrap() < text.find("\"a\"").unwrap());
    }
}

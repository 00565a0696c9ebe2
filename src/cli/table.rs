//! Table output for list-style commands
//!
//! A command builds one [`TableOutput`] and picks the encoding from the
//! output format. JSON and YAML are not table encodings; commands serialize
//! their typed values for those.

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::OutputFormat;

/// Rows of pre-formatted cells under fixed headers
#[derive(Debug, Clone)]
pub struct TableOutput {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl TableOutput {
    pub fn new(headers: &[&'static str]) -> Self {
        Self {
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Encode for `format`. `Auto` means TSV, which pipes cleanly.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Md => Ok(self.to_markdown()),
            OutputFormat::Csv => self.to_delimited(b','),
            OutputFormat::Tsv | OutputFormat::Auto => self.to_delimited(b'\t'),
            OutputFormat::Json | OutputFormat::Yaml => Err(miette::miette!(
                "{:?} is not a table format",
                format
            )),
        }
    }

    /// Markdown table with a trailing newline
    pub fn to_markdown(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(self.headers.iter().copied());
        for row in &self.rows {
            builder.push_record(row.iter().map(String::as_str));
        }
        let mut out = builder.build().with(Style::markdown()).to_string();
        out.push('\n');
        out
    }

    fn to_delimited(&self, delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());
        writer.write_record(&self.headers).into_diagnostic()?;
        for row in &self.rows {
            writer.write_record(row).into_diagnostic()?;
        }
        let bytes = writer.into_inner().into_diagnostic()?;
        String::from_utf8(bytes).into_diagnostic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableOutput {
        let mut table = TableOutput::new(&["Code", "Height"]);
        table.push_row(vec!["Q0".to_string(), "40-60cm".to_string()]);
        table.push_row(vec!["HIII, 6YO".to_string(), "105-125cm".to_string()]);
        table
    }

    #[test]
    fn test_markdown_has_header_separator() {
        let md = sample().to_markdown();
        let lines: Vec<&str> = md.lines().collect();
        assert!(lines[0].contains("Code"));
        assert!(lines[1].starts_with("|-"));
        assert!(lines[2].contains("Q0"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_csv_quotes_commas() {
        let csv = sample().render(OutputFormat::Csv).unwrap();
        assert_eq!(csv, "Code,Height\nQ0,40-60cm\n\"HIII, 6YO\",105-125cm\n");
    }

    #[test]
    fn test_tsv_is_default() {
        let tsv = sample().render(OutputFormat::Auto).unwrap();
        assert!(tsv.starts_with("Code\tHeight\n"));
        assert!(tsv.contains("HIII, 6YO\t105-125cm"));
    }

    #[test]
    fn test_json_is_not_a_table_format() {
        assert!(sample().render(OutputFormat::Json).is_err());
        assert_eq!(sample().len(), 2);
        assert!(!sample().is_empty());
    }
}

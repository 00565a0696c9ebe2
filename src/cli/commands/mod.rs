//! Command implementations

pub mod catalog;
pub mod completions;
pub mod config;
pub mod dummy;
pub mod init;
pub mod matrix;
pub mod reg;
pub mod report;
pub mod thresholds;

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::cli::OutputFormat;

/// Write rendered output to a file, or print it. `what` names the artifact in
/// the status line.
pub(crate) fn write_output(
    content: &str,
    what: &str,
    output_path: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    match output_path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).into_diagnostic()?;
            }
            let file = File::create(path).into_diagnostic()?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes()).into_diagnostic()?;
            writer.flush().into_diagnostic()?;
            if !quiet {
                println!(
                    "{} {} written to {}",
                    console::style("✓").green(),
                    what,
                    console::style(path.display()).cyan()
                );
            }
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

/// Serialize a value for the JSON and YAML formats
pub(crate) fn serialize<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(value).into_diagnostic()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Yaml => serde_yml::to_string(value).into_diagnostic(),
        other => Err(miette::miette!("{:?} is not a serialization format", other)),
    }
}

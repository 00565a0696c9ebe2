//! `crsc thresholds` command - Regulatory limits for one regulation

use miette::Result;

use crate::cli::helpers::{load_catalog, resolve_regulations};
use crate::cli::table::TableOutput;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::engineering::thresholds_for;

use super::serialize;

#[derive(clap::Args, Debug)]
pub struct ThresholdsArgs {
    /// Record identifier or regulation number (e.g. "UN R129", fmvss213b)
    pub selector: String,
}

pub fn run(args: ThresholdsArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;
    let records = resolve_regulations(&catalog, &[args.selector])?;
    let Some(record) = records.first() else {
        return Ok(());
    };

    let thresholds = thresholds_for(&record.number);

    let format = global.format.or_default(config.default_format.as_deref());
    if matches!(format, OutputFormat::Json | OutputFormat::Yaml) {
        print!("{}", serialize(&thresholds, format)?);
        return Ok(());
    }

    if thresholds.is_empty() && !global.quiet {
        eprintln!(
            "{}",
            console::style(format!("No thresholds catalogued for {}", record.number)).dim()
        );
    }

    let mut table = TableOutput::new(&[
        "Test Item",
        "Parameter",
        "Applicable Dummy",
        "Limit",
        "Unit",
        "Clause",
    ]);
    for threshold in &thresholds {
        table.push_row(vec![
            threshold.test_item.clone(),
            threshold.parameter.clone(),
            threshold.applicable_dummy.clone(),
            threshold.limit_display(),
            threshold.unit.clone(),
            threshold.clause.clone(),
        ]);
    }
    print!("{}", table.render(format)?);
    Ok(())
}

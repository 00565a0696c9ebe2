//! `crsc reg` command - Regulation records

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{load_catalog, resolve_regulations, truncate_str};
use crate::cli::table::TableOutput;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::engineering::thresholds_for;
use crate::entities::regulation::LABEL_DATE_FORMAT;
use crate::entities::{RegulationRecord, RegulationStatus};

use super::serialize;

#[derive(Subcommand, Debug)]
pub enum RegCommands {
    /// List regulation records
    List(ListArgs),

    /// Show one regulation record
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only records with this status
    #[arg(long, value_enum)]
    pub status: Option<RegulationStatus>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Record identifier or regulation number (e.g. REF_FMVSS_213A, fmvss213a)
    pub selector: String,
}

pub fn run(cmd: RegCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        RegCommands::List(args) => run_list(args, global),
        RegCommands::Show(args) => run_show(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;

    let records: Vec<&RegulationRecord> = catalog
        .regulations()
        .iter()
        .filter(|r| args.status.map_or(true, |s| r.status == s))
        .collect();

    let format = global.format.or_default(config.default_format.as_deref());
    if matches!(format, OutputFormat::Json | OutputFormat::Yaml) {
        print!("{}", serialize(&records, format)?);
        return Ok(());
    }

    let mut table = TableOutput::new(&[
        "ID",
        "Regulation",
        "Version",
        "Status",
        "Effective",
        "Compliance",
        "Scope",
    ]);
    for record in &records {
        table.push_row(vec![
            record.id.clone(),
            record.number.clone(),
            record.version.clone(),
            status_cell(record),
            record.effective_date.to_string(),
            record.compliance_date.to_string(),
            truncate_str(&record.scope, 48),
        ]);
    }
    print!("{}", table.render(format)?);
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;
    let records = resolve_regulations(&catalog, &[args.selector])?;
    let Some(record) = records.first() else {
        return Ok(());
    };

    let format = global.format.or_default(config.default_format.as_deref());
    if matches!(format, OutputFormat::Json | OutputFormat::Yaml) {
        print!("{}", serialize(record, format)?);
        return Ok(());
    }

    println!("{}", style(record.label()).bold());
    println!("  {:<12} {}", style("ID:").cyan(), record.id);
    println!("  {:<12} {}", style("Status:").cyan(), status_cell(record));
    println!(
        "  {:<12} {}",
        style("Effective:").cyan(),
        record.effective_date.format(LABEL_DATE_FORMAT)
    );
    println!(
        "  {:<12} {}",
        style("Compliance:").cyan(),
        record.compliance_date.format(LABEL_DATE_FORMAT)
    );
    let today = chrono::Local::now().date_naive();
    let mandatory = if record.is_mandatory_on(today) {
        style("yes").green()
    } else {
        style("no").yellow()
    };
    println!("  {:<12} {}", style("Mandatory:").cyan(), mandatory);
    println!("  {:<12} {}", style("Scope:").cyan(), record.scope);
    println!("  {:<12} {}", style("URL:").cyan(), style(&record.url).dim());

    if !record.advisories.is_empty() {
        println!();
        println!("{}", style("Advisories:").bold());
        for note in &record.advisories {
            println!("  - {}", note);
        }
    }

    let thresholds = thresholds_for(&record.number);
    if !thresholds.is_empty() {
        println!();
        println!(
            "{} {}",
            style(format!("{} catalogued limit(s)", thresholds.len())).dim(),
            style(format!("(crsc thresholds \"{}\")", record.number)).dim()
        );
    }
    Ok(())
}

/// FUTURE records carry the date they become mandatory
fn status_cell(record: &RegulationRecord) -> String {
    if record.is_future() {
        format!(
            "{} (mandatory {})",
            record.status,
            record.compliance_date.format(LABEL_DATE_FORMAT)
        )
    } else {
        record.status.to_string()
    }
}

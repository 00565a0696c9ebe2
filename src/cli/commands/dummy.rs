//! `crsc dummy` command - Crash-test dummy lookups

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::args::EnvelopeArgs;
use crate::cli::helpers::{build_envelope, load_catalog};
use crate::cli::table::TableOutput;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, ReferenceCatalog};
use crate::engineering::{match_dummies, DummyRegion};
use crate::entities::{DummyProfile, DummySeries};

use super::serialize;

#[derive(Subcommand, Debug)]
pub enum DummyCommands {
    /// List catalog dummies
    List(ListArgs),

    /// Dummies whose stature and mass bands overlap an envelope
    Match(MatchArgs),

    /// Test dummy used for a stature in the matrix step tables
    Code(CodeArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only this series
    #[arg(long, value_enum)]
    pub series: Option<DummySeries>,

    /// Only dummies used by this regulation (identifier or number)
    #[arg(long = "reg", short = 'r')]
    pub regulation: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct MatchArgs {
    #[command(flatten)]
    pub envelope: EnvelopeArgs,

    /// Only dummies used by this regulation (identifier or number)
    #[arg(long = "reg", short = 'r')]
    pub regulation: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct CodeArgs {
    /// Child stature in cm
    pub height: f64,

    /// Dummy programme
    #[arg(long, value_enum, default_value = "eu")]
    pub region: DummyRegion,
}

pub fn run(cmd: DummyCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DummyCommands::List(args) => run_list(args, global),
        DummyCommands::Match(args) => run_match(args, global),
        DummyCommands::Code(args) => run_code(args, global),
    }
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;
    let number = regulation_number(&catalog, args.regulation.as_deref())?;

    let dummies: Vec<&DummyProfile> = catalog
        .dummies()
        .iter()
        .filter(|d| args.series.map_or(true, |s| d.series == s))
        .filter(|d| number.as_deref().map_or(true, |n| d.applies_to(n)))
        .collect();

    print_dummies(&dummies, global, &config)
}

fn run_match(args: MatchArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;
    let envelope = build_envelope(&args.envelope, &config)?;
    let number = regulation_number(&catalog, args.regulation.as_deref())?;

    let matched: Vec<&DummyProfile> = match_dummies(&catalog, &envelope)
        .into_iter()
        .filter(|d| number.as_deref().map_or(true, |n| d.applies_to(n)))
        .collect();

    if matched.is_empty() && !global.quiet {
        eprintln!(
            "{} No catalog dummy overlaps {} / {}",
            style("!").yellow(),
            envelope.height_cm.display_with_unit("cm"),
            envelope.mass_kg.display_with_unit("kg")
        );
    }
    print_dummies(&matched, global, &config)
}

fn run_code(args: CodeArgs, global: &GlobalOpts) -> Result<()> {
    if !args.height.is_finite() || args.height < 0.0 {
        return Err(miette::miette!("height must be a non-negative number of cm"));
    }
    let code = args.region.dummy_code(args.height);
    let config = Config::load();
    let format = global.format.or_default(config.default_format.as_deref());

    match format {
        OutputFormat::Json | OutputFormat::Yaml => {
            let value = serde_json::json!({
                "height_cm": args.height,
                "region": args.region,
                "dummy_code": code,
            });
            print!("{}", serialize(&value, format)?);
        }
        _ => println!("{}", code),
    }
    Ok(())
}

/// Number of the regulation named by an optional selector
fn regulation_number(catalog: &ReferenceCatalog, selector: Option<&str>) -> Result<Option<String>> {
    let Some(selector) = selector else {
        return Ok(None);
    };
    let selectors = [selector.to_string()];
    let records = crate::cli::helpers::resolve_regulations(catalog, &selectors)?;
    Ok(records.into_iter().next().map(|r| r.number))
}

fn print_dummies(dummies: &[&DummyProfile], global: &GlobalOpts, config: &Config) -> Result<()> {
    let format = global.format.or_default(config.default_format.as_deref());
    if matches!(format, OutputFormat::Json | OutputFormat::Yaml) {
        print!("{}", serialize(&dummies, format)?);
        return Ok(());
    }

    let mut table = TableOutput::new(&[
        "Code",
        "Series",
        "Height (cm)",
        "Mass (kg)",
        "Age",
        "Facing",
        "Regulations",
    ]);
    for dummy in dummies {
        table.push_row(vec![
            dummy.code.clone(),
            dummy.series.to_string(),
            dummy.height_cm.to_string(),
            dummy.mass_kg.to_string(),
            dummy.age_range.clone(),
            dummy.install_direction.to_string(),
            dummy.applicable_regulations.join(", "),
        ]);
    }
    print!("{}", table.render(format)?);
    Ok(())
}

//! `crsc catalog` command - Export or validate reference catalogs

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_catalog;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, ReferenceCatalog};

use super::{serialize, write_output};

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Dump the active catalog (builtin unless --catalog is given) as YAML
    Export(ExportArgs),

    /// Load a catalog file and check its invariants
    Validate(ValidateArgs),
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Catalog file to validate
    pub file: PathBuf,
}

pub fn run(cmd: CatalogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CatalogCommands::Export(args) => run_export(args, global),
        CatalogCommands::Validate(args) => run_validate(args, global),
    }
}

fn run_export(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(global, &config)?;

    let format = match global.format {
        OutputFormat::Json => OutputFormat::Json,
        _ => OutputFormat::Yaml,
    };
    let content = serialize(catalog.as_ref(), format)?;
    write_output(&content, "Catalog", args.output.as_deref(), global.quiet)
}

fn run_validate(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = ReferenceCatalog::load(&args.file)?;

    if !global.quiet {
        println!(
            "{} {} is valid: {} dummies, {} regulation records",
            style("✓").green(),
            style(args.file.display()).cyan(),
            catalog.dummies().len(),
            catalog.regulations().len()
        );
    }
    Ok(())
}

//! `crsc report` command - Generate the engineering compliance report

use miette::Result;
use std::path::PathBuf;

use crate::cli::args::{EnvelopeArgs, SelectionArgs};
use crate::cli::helpers::resolve_inputs;
use crate::cli::render::render_report;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Project};
use crate::engineering::generate;

use super::{serialize, write_output};

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub envelope: EnvelopeArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output to file instead of stdout
    #[arg(long, short = 'o', conflicts_with = "save")]
    pub output: Option<PathBuf>,

    /// Save into the project's reports/ directory
    #[arg(long)]
    pub save: bool,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let inputs = resolve_inputs(global, &config, &args.envelope, &args.selection)?;

    let output = generate(
        &inputs.catalog,
        &inputs.envelope,
        &inputs.regulations,
        &inputs.install_method,
    );

    let format = global.format.or_default(config.default_format.as_deref());
    let (content, extension) = match format {
        OutputFormat::Auto | OutputFormat::Md => (render_report(&output), "md"),
        OutputFormat::Json => (serialize(&output, format)?, "json"),
        OutputFormat::Yaml => (serialize(&output, format)?, "yaml"),
        OutputFormat::Tsv | OutputFormat::Csv => {
            return Err(miette::miette!(
                help = "Use `crsc matrix` for tabular output",
                "the report supports md, json and yaml output"
            ));
        }
    };

    let path = if args.save {
        let project = Project::discover()?;
        let name = format!(
            "report-{}.{}",
            output.metadata.generated_at.format("%Y%m%d-%H%M%S"),
            extension
        );
        Some(project.reports_dir().join(name))
    } else {
        args.output
    };

    write_output(&content, "Report", path.as_deref(), global.quiet)
}

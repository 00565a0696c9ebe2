//! `crsc matrix` command - Crash-test configurations for an envelope

use miette::Result;

use crate::cli::args::{EnvelopeArgs, SelectionArgs};
use crate::cli::helpers::resolve_inputs;
use crate::cli::render::matrix_table;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::engineering::build_test_matrix;

use super::serialize;

#[derive(clap::Args, Debug)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub envelope: EnvelopeArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

pub fn run(args: MatrixArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let inputs = resolve_inputs(global, &config, &args.envelope, &args.selection)?;

    let configs = build_test_matrix(&inputs.envelope, &inputs.regulations, &inputs.install_method);

    let format = global.format.or_default(config.default_format.as_deref());
    match format {
        OutputFormat::Json | OutputFormat::Yaml => print!("{}", serialize(&configs, format)?),
        _ => {
            if configs.is_empty() && !global.quiet {
                eprintln!(
                    "{}",
                    console::style("No test configurations for the selected regulations").dim()
                );
            }
            print!("{}", matrix_table(&configs).render(format)?);
        }
    }
    Ok(())
}

//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    catalog::CatalogCommands, completions::CompletionsArgs, config::ConfigCommands,
    dummy::DummyCommands, init::InitArgs, matrix::MatrixArgs, reg::RegCommands,
    report::ReportArgs, thresholds::ThresholdsArgs,
};

#[derive(Parser)]
#[command(name = "crsc")]
#[command(author, version, about = "Child restraint system compliance toolkit")]
#[command(long_about = "Maps a child restraint's stature and mass envelope onto crash-test dummies, regulatory limits and test configurations for UN R129 and FMVSS 213.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Reference catalog file (default: builtin catalog)
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a crsc project (.crsc/config.yaml)
    Init(InitArgs),

    /// Generate the engineering compliance report
    Report(ReportArgs),

    /// Show the crash-test matrix for an envelope
    Matrix(MatrixArgs),

    /// Crash-test dummy lookups
    #[command(subcommand)]
    Dummy(DummyCommands),

    /// Regulation records
    #[command(subcommand)]
    Reg(RegCommands),

    /// Regulatory limits for a regulation
    Thresholds(ThresholdsArgs),

    /// Export or validate reference catalogs
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown for reports, tables for lists
    #[default]
    Auto,
    /// Markdown
    Md,
    /// JSON format (for programming)
    Json,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
}

impl OutputFormat {
    /// Resolve `auto` against the configured default format
    pub fn or_default(self, configured: Option<&str>) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        match configured {
            Some(name) => OutputFormat::from_str(name, true).unwrap_or_else(|_| {
                tracing::warn!(format = name, "unknown default_format in config, using auto");
                OutputFormat::Auto
            }),
            None => OutputFormat::Auto,
        }
    }
}

/// Product envelope flags; unset bounds fall back to config
#[derive(clap::Args, Clone, Debug, Default)]
pub struct EnvelopeArgs {
    /// Minimum child stature in cm
    #[arg(long)]
    pub min_height: Option<f64>,

    /// Maximum child stature in cm
    #[arg(long)]
    pub max_height: Option<f64>,

    /// Minimum child mass in kg
    #[arg(long)]
    pub min_weight: Option<f64>,

    /// Maximum child mass in kg
    #[arg(long)]
    pub max_weight: Option<f64>,
}

/// Regulation selection flags
#[derive(clap::Args, Clone, Debug, Default)]
pub struct SelectionArgs {
    /// Regulation to include, by identifier or number (repeatable, e.g. --reg "UN R129" --reg fmvss213a)
    #[arg(long = "reg", short = 'r')]
    pub regulations: Vec<String>,

    /// Install method written into the test matrix
    #[arg(long = "install")]
    pub install_method: Option<String>,
}

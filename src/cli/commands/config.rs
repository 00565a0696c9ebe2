//! `crsc config` command - Inspect configuration

use clap::Subcommand;
use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::project::Project;
use crate::core::Config;

use super::serialize;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration values
    Show(ShowArgs),

    /// Show paths to configuration files
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Show only this key's value
    pub key: Option<String>,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("min_height_cm", "Default minimum child stature (cm)"),
    ("max_height_cm", "Default maximum child stature (cm)"),
    ("min_weight_kg", "Default minimum child mass (kg)"),
    ("max_weight_kg", "Default maximum child mass (kg)"),
    ("install_method", "Install method written into the test matrix"),
    ("regulations", "Regulations selected when --reg is not given"),
    ("catalog", "Custom reference catalog file"),
    ("default_format", "Default output format (md, json, yaml, tsv, csv)"),
];

pub fn run(cmd: ConfigCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, global),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    if let Some(key) = &args.key {
        if !VALID_KEYS.iter().any(|(k, _)| *k == key.as_str()) {
            return Err(miette::miette!(
                help = "Run 'crsc config keys' for the list",
                "unknown config key '{}'",
                key
            ));
        }
        match config.get(key) {
            Some(v) => println!("{}", v),
            None => return Err(miette::miette!("Key '{}' is not set", key)),
        }
        return Ok(());
    }

    if matches!(global.format, OutputFormat::Json | OutputFormat::Yaml) {
        print!("{}", serialize(&config, global.format)?);
        return Ok(());
    }

    println!("{}", style("Effective Configuration").bold().underlined());
    println!();
    for (key, _) in VALID_KEYS {
        match config.get(key) {
            Some(v) => println!("  {}: {}", style(key).cyan(), style(v).yellow()),
            None => println!(
                "  {}: {} {}",
                style(key).cyan(),
                style(default_value(&config, key)).dim(),
                style("(default)").dim()
            ),
        }
    }

    println!();
    println!("{}", style("Config Sources (in priority order):").dim());
    println!("  1. Command-line flags");
    println!("  2. Environment variables (CRSC_INSTALL_METHOD, CRSC_REGULATIONS, CRSC_CATALOG, CRSC_FORMAT)");
    println!("  3. Project config (.crsc/config.yaml)");
    println!("  4. Global config (~/.config/crsc/config.yaml)");
    Ok(())
}

fn default_value(config: &Config, key: &str) -> String {
    match key {
        "min_height_cm" => config.min_height_cm().to_string(),
        "max_height_cm" => config.max_height_cm().to_string(),
        "min_weight_kg" => config.min_weight_kg().to_string(),
        "max_weight_kg" => config.max_weight_kg().to_string(),
        "install_method" => config.install_method(),
        "regulations" => config.regulations().join(", "),
        "catalog" => "builtin".to_string(),
        "default_format" => "auto".to_string(),
        _ => "-".to_string(),
    }
}

fn run_path() -> Result<()> {
    let global_path = get_global_config_path()?;

    println!("{}", style("Configuration file paths:").bold());
    println!();
    println!("  {} {}", style("Global:").cyan(), global_path.display());
    print_exists(global_path.exists(), 9);

    match Project::discover() {
        Ok(project) => {
            let path = project.config_path();
            println!();
            println!("  {} {}", style("Project:").cyan(), path.display());
            print_exists(path.exists(), 10);
        }
        Err(_) => {
            println!();
            println!(
                "  {} {}",
                style("Project:").cyan(),
                style("(not in a crsc project)").dim()
            );
        }
    }
    Ok(())
}

fn print_exists(exists: bool, indent: usize) {
    if exists {
        println!("{:indent$}{}", "", style("(exists)").green(), indent = indent);
    } else {
        println!("{:indent$}{}", "", style("(not created)").dim(), indent = indent);
    }
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Set keys in .crsc/config.yaml or the global config file.").dim()
    );
    Ok(())
}

fn get_global_config_path() -> Result<PathBuf> {
    Config::global_config_path()
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))
}

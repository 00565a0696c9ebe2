//! `crsc init` command - Initialize a crsc project

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::project::{Project, ProjectError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Rewrite the config even if .crsc/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    match Project::init(&path, args.force) {
        Ok(project) => {
            println!(
                "{} Initialized crsc project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            println!("Created project structure:");
            println!("  {}", style(".crsc/config.yaml").dim());
            println!("  {}", style("reports/").dim());
            println!();
            println!("Next steps:");
            println!(
                "  {} Set the product envelope and regulations",
                style("$EDITOR .crsc/config.yaml").yellow()
            );
            println!(
                "  {} Generate the compliance report",
                style("crsc report --save").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} crsc project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!("Use {} to reinitialize", style("crsc init --force").yellow());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

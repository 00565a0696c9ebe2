use clap::Parser;
use crsc::cli::{Cli, Commands, GlobalOpts};
use miette::{IntoDiagnostic, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Reset SIGPIPE so piping into `head` terminates quietly instead of panicking
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_logging(&global)?;

    match cli.command {
        Commands::Init(args) => crsc::cli::commands::init::run(args),
        Commands::Report(args) => crsc::cli::commands::report::run(args, &global),
        Commands::Matrix(args) => crsc::cli::commands::matrix::run(args, &global),
        Commands::Dummy(cmd) => crsc::cli::commands::dummy::run(cmd, &global),
        Commands::Reg(cmd) => crsc::cli::commands::reg::run(cmd, &global),
        Commands::Thresholds(args) => crsc::cli::commands::thresholds::run(args, &global),
        Commands::Catalog(cmd) => crsc::cli::commands::catalog::run(cmd, &global),
        Commands::Config(cmd) => crsc::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => crsc::cli::commands::completions::run(args),
    }
}

/// Diagnostics go to stderr so stdout stays clean for piping
fn init_logging(global: &GlobalOpts) -> Result<()> {
    let level = if global.quiet {
        Level::ERROR
    } else if global.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).into_diagnostic()
}

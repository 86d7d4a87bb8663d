//! # mind-builder CLI Entry Point
//!
//! Parses `mind-builder <COMMAND> [PROPERTIES]`, loads the build settings and
//! dispatches to the library. Errors are printed once and mapped to an exit
//! status per error class.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::*;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use mind_builder::build::{CleanReport, Tools};
use mind_builder::config;
use mind_builder::toolchain::{self, DryRunLauncher, InstallRootSupplier, ProcessLauncher};
use mind_builder::{BuilderError, Command, Dispatcher, ErrorClass, Outcome, Settings};

#[derive(Parser)]
#[command(name = "mind-builder")]
#[command(about = "Build, test and draw MIND projects from a properties file", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// Command to run
    #[arg(value_enum)]
    command: Command,

    /// Properties file with the build settings (default: read the environment)
    properties: Option<PathBuf>,

    /// Show resolved settings and debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the tool invocation instead of running it; touch no directories
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(ErrorClass::Usage.exit_code())
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("mind_builder=debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> mind_builder::Result<()> {
    let settings = config::load(cli.properties.as_deref())?;
    if cli.verbose {
        print_settings(&settings);
    }

    let dry_run = cli.dry_run;
    let dispatcher = Dispatcher::new(settings).dry_run(dry_run);
    let outcome = dispatcher.run(cli.command, || {
        let root = toolchain::install_root()?;
        let launcher: Box<dyn toolchain::ToolLauncher> = if dry_run {
            Box::new(DryRunLauncher::new(&root))
        } else {
            Box::new(ProcessLauncher::new(&root))
        };
        Ok(Tools {
            launcher,
            supplier: Box::new(InstallRootSupplier::new(&root)),
        })
    })?;

    match outcome {
        Outcome::Launched(invocation) => {
            if !dry_run {
                println!("{} {} finished", "✓".green(), invocation.tool);
            }
        }
        Outcome::Cleaned(report) => print_clean(&report),
        Outcome::DocSkipped => {
            println!(
                "{} Documentation generation is not implemented yet; nothing to do.",
                "!".yellow()
            );
            if let Some(root) = toolchain::doc_root() {
                println!("   {} {}", "MINDOC_HOME:".dimmed(), root.display());
            }
        }
    }
    Ok(())
}

fn print_settings(settings: &Settings) {
    match toml::to_string_pretty(settings) {
        Ok(dump) => {
            eprintln!("{}", "Resolved settings:".bold());
            for line in dump.lines() {
                eprintln!("   {line}");
            }
        }
        Err(e) => tracing::warn!(error = %e, "cannot display settings"),
    }
}

fn print_clean(report: &CleanReport) {
    match (report.files, report.dry_run) {
        (None, _) => println!(
            "{} Nothing to clean at {}",
            "!".yellow(),
            report.path.display()
        ),
        (Some(files), true) => println!(
            "{} Would remove {} ({} files)",
            "[dry-run]".dimmed(),
            report.path.display(),
            files
        ),
        (Some(files), false) => println!(
            "{} Removed {} ({} files)",
            "🗑️".red(),
            report.path.display(),
            files
        ),
    }
}

fn report_error(e: &BuilderError) {
    eprintln!("{} {}", "error:".red().bold(), e);
    if let Some(hint) = e.hint() {
        eprintln!("{} {}", "hint:".yellow().bold(), hint);
    }
}

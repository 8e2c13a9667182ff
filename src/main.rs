//! # alb CLI Entry Point
//!
//! This is the main executable for the `alb` command-line tool.
//! It parses CLI arguments using clap and routes commands to the library.
//!
//! ## Commands
//!
//! - `build` - recompile stale sources, rebuild `alco.jar`, install `alco`
//! - `test` - run the fixture suite against the built compiler
//! - `clean` - drop staging and unpack directories
//! - `completion` - print shell completions
//!
//! Every error surfaces here: it is printed once and the process exits 1.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use alb::build::{self, BuildOptions};
use alb::config::{self, ProjectConfig};
use alb::harness;

#[derive(Parser)]
#[command(name = "alb")]
#[command(about = "Builds and tests the AlCo compiler", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project root
    #[arg(short = 'C', long = "dir", global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile changed sources and rebuild the bundle
    #[command(
        after_help = "Note: an archive is never unpacked twice. To pick up a changed jar, run `alb clean` first.\nSet DEBUG in the environment to compile with debug symbols."
    )]
    Build {
        /// Print full command lines instead of file names
        #[arg(short, long)]
        verbose: bool,
    },
    /// Run every fixture in the test directory (the compiler must be built already)
    Test,
    /// Remove staging and unpacked archive directories
    Clean {
        /// Also remove the bundle, the launcher, and compiled outputs
        #[arg(long)]
        all: bool,
    },
    /// Generate shell completion scripts
    Completion { shell: Shell },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "x".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Commands::Build { verbose } => {
            let (root, config) = open_project(cli)?;
            build::build_project(&root, &config, &BuildOptions::from_env(*verbose))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Test => {
            let (root, config) = open_project(cli)?;
            let summary = harness::run_fixtures(&root, &config.test)?;
            if summary.total == 0 {
                return Ok(ExitCode::SUCCESS);
            }

            println!(
                "\nTest Result: {}/{} passed.",
                summary.passed(),
                summary.total
            );
            match summary.failure() {
                None => {
                    println!("{}", "ALL TESTS PASSED ✨".green().bold());
                    Ok(ExitCode::SUCCESS)
                }
                Some(failed) => {
                    println!(
                        "{} {}",
                        "STOPPED AT".red().bold(),
                        failed.fixture.display()
                    );
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Commands::Clean { all } => {
            let (root, config) = open_project(cli)?;
            build::clean(&root, &config, *all)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let bin_name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn open_project(cli: &Cli) -> Result<(PathBuf, ProjectConfig)> {
    let root = cli
        .dir
        .canonicalize()
        .with_context(|| format!("Project directory {} not found", cli.dir.display()))?;
    let config = config::load_config(&root)?;
    Ok((root, config))
}

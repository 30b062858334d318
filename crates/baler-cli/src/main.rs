//! Baler CLI - command-line interface for the baler module bundler.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use baler_core::error::cli::CliError;

/// Baler: a build-time JavaScript module bundler.
///
/// Discovers source modules, resolves declared aliases and shims, and
/// emits a single browser artifact, with optional lint gating and a
/// watch mode that rebuilds on change.
#[derive(Debug, Parser)]
#[command(name = "baler")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (can be repeated: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path (defaults to the nearest baler.toml).
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a build task once.
    ///
    /// The default task compiles the bundle; `--lint` selects the
    /// lint-gated variant and `--dev` embeds source-position metadata.
    #[command(visible_alias = "b")]
    Build(commands::BuildArgs),

    /// Build, then rebuild whenever an input file changes.
    ///
    /// Change events arriving during a build are queued and trigger the
    /// next invocation after the current one finishes.
    #[command(visible_alias = "w")]
    Watch(commands::BuildArgs),

    /// List the registered tasks and their step sequences.
    Tasks,

    /// Show version information.
    Version,
}

fn print_cli_error(e: &CliError) {
    if let CliError::Build(build) = e {
        if let Some(violations) = build.lint_violations() {
            for violation in violations {
                eprintln!("{}", violation);
            }
        }
    }
    eprintln!("{}", e);
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| level.to_string()))
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let result = match cli.command {
        Command::Build(args) => commands::build::execute(cli.config.as_deref(), args),
        Command::Watch(args) => commands::watch::execute(cli.config.as_deref(), args),
        Command::Tasks => commands::tasks::execute(),
        Command::Version => {
            print_version();
            Ok(())
        }
    };

    result.map(|_| ExitCode::SUCCESS).unwrap_or_else(|e| {
        print_cli_error(&e);
        ExitCode::from(e.exit_code() as u8)
    })
}

/// Print version information.
fn print_version() {
    println!("baler {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Target: {}", std::env::consts::ARCH);
    println!("OS: {}", std::env::consts::OS);
}

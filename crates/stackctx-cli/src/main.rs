//! stackctx CLI
//!
//! Resolves the configuration for a multi-stack deployment and prints the
//! resulting shared provisioning context.

mod cli;
mod commands;
mod context;
mod error;

use std::io;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        report(&e);
        std::process::exit(1);
    }
}

fn report(e: &CliError) {
    eprintln!("{}: {}", format!("error[{}]", e.label()).red().bold(), e);
    if let Some(hint) = e.remediation() {
        eprintln!("  {}: {}", "hint".cyan(), hint);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    match cli.command.clone().unwrap_or(Commands::Show { json: false }) {
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "stackctx", &mut io::stdout());
            Ok(())
        }
        Commands::Show { json } => commands::run_show(&context::assemble(&cli.resolve)?, json),
        Commands::Get { path, raw } => {
            commands::run_get(&context::assemble(&cli.resolve)?, &path, raw)
        }
        Commands::Stacks => commands::run_stacks(&context::assemble(&cli.resolve)?),
    }
}

/// Log to stderr, honoring `RUST_LOG` over the verbosity flags.
fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(cli.verbose)
        .init();
    tracing::debug!("Verbose mode enabled");
}

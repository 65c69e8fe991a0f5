//! cc - AI-reviewed commits
//!
//! This is the main entry point for the claude-commit command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use commands::commit::CommitOptions;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.show_version {
        commands::version::run();
        return Ok(());
    }

    let options = CommitOptions {
        plan: false,
        force: cli.force,
        push: !cli.no_push,
    };

    match cli.command {
        None => commands::commit::run(options).await,
        Some(Commands::Plan) => {
            commands::commit::run(CommitOptions {
                plan: true,
                ..options
            })
            .await
        }
        Some(Commands::Update(args)) => commands::update::run(args).await,
        Some(Commands::Models) => commands::models::run(),
        Some(Commands::Version) => {
            commands::version::run();
            Ok(())
        }
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Status lines are printed directly, so logs stay quiet by default
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

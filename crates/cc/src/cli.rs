//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};

/// cc - Review, commit and push your changes with Claude
#[derive(Parser, Debug)]
#[command(name = "cc")]
#[command(about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version information
    #[arg(short = 'v', long = "version")]
    pub show_version: bool,

    /// Increase log verbosity (--verbose, --verbose --verbose)
    #[arg(long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Commit even when the review reports issues
    #[arg(short, long, global = true)]
    pub force: bool,

    /// Commit without pushing
    #[arg(long, global = true)]
    pub no_push: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Review and show the commit message, then ask before committing
    Plan,

    /// Update cc to the latest release
    Update(UpdateArgs),

    /// Choose the Claude model used for reviews
    Models,

    /// Show version information
    Version,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Only check whether a newer release exists
    #[arg(long)]
    pub check: bool,
}

//! Deferlink CLI - deferlink command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod scenario;
mod util;

/// Deferlink - Deferred deep link resolution for nested navigators
#[derive(Parser)]
#[command(name = "deferlink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Linking options file
    #[arg(short, long, global = true, default_value = "linking.toml")]
    config: PathBuf,

    /// Log resolution steps
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strip a link down to its path using the configured prefixes
    Extract {
        /// Incoming link (e.g., rn://outer/profile)
        url: String,
    },
    /// Parse a path into navigation state
    Parse {
        /// Path relative to the prefix (e.g., outer/profile?tab=posts)
        path: String,
    },
    /// Run a sign-in scenario against a navigation container
    Simulate {
        /// Scenario file (TOML)
        scenario: PathBuf,
        /// Print the final tree state as JSON instead of step output
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    util::init_tracing(cli.verbose);

    match cli.command {
        Commands::Extract { url } => cmd::extract::run(&cli.config, &url),
        Commands::Parse { path } => cmd::parse::run(&cli.config, &path),
        Commands::Simulate { scenario, json } => cmd::simulate::run(&cli.config, &scenario, json),
    }
}

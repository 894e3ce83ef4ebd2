//! CLI for staging remote documents.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use acquire_core::config;

use commands::{run_check, run_encode, run_fetch};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "oscap-acquire")]
#[command(about = "Stage remote documents in private temporary directories", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Report whether a URL's scheme would be fetched.
    Check {
        url: String,
    },

    /// Print the percent-encoded, filesystem-safe name for a URL.
    Encode {
        url: String,
    },

    /// Download a URL into a fresh private temp directory.
    Fetch {
        /// Plain http:// URL to download.
        url: String,
        /// Keep the temp directory and print the file path instead of the contents.
        #[arg(long)]
        keep: bool,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Check { url } => run_check(&url),
            CliCommand::Encode { url } => run_encode(&url)?,
            CliCommand::Fetch { url, keep } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(&cfg, &url, keep)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

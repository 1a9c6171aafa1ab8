//! CLI for the httpoops fault classifier.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use httpoops_core::config;
use httpoops_core::Config;
use std::path::{Path, PathBuf};

use commands::{run_policy, run_probe, ProbeArgs};

/// Top-level CLI for httpoops.
#[derive(Debug, Parser)]
#[command(name = "httpoops")]
#[command(about = "httpoops: classify HTTP outcomes and recommend retries", long_about = None)]
pub struct Cli {
    /// Policy file to use instead of ~/.config/httpoops/policy.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub policy: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a URL once and print how the outcome is classified.
    Probe {
        /// HTTP/HTTPS URL to request.
        url: String,

        /// Whole-request timeout in seconds; 0 disables it.
        #[arg(long, default_value = "30", value_name = "SECS")]
        timeout: u64,

        /// Extra request header, e.g. --header 'Accept: application/json'. Repeatable.
        #[arg(long = "header", value_name = "HEADER")]
        headers: Vec<String>,

        /// Print the outcome record as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the effective policy as TOML.
    Policy,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_policy(cli.policy.as_deref())?;
        tracing::debug!("loaded policy: {:?}", cfg);

        match cli.command {
            CliCommand::Probe {
                url,
                timeout,
                headers,
                json,
            } => {
                let args = ProbeArgs {
                    url,
                    timeout_secs: timeout,
                    headers,
                    json,
                };
                run_probe(&cfg, args).await?
            }
            CliCommand::Policy => run_policy(&cfg)?,
        }

        Ok(())
    }
}

fn load_policy(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => config::load_from(path),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;

//! `httpoops policy` – print the effective policy.

use anyhow::Result;
use httpoops_core::config::PolicyFile;
use httpoops_core::Config;

pub fn run_policy(cfg: &Config) -> Result<()> {
    let toml = PolicyFile::from_config(cfg).to_toml_string()?;
    print!("{}", toml);
    Ok(())
}

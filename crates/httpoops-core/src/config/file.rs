//! TOML policy file: overrides and default wait, loaded from
//! `~/.config/httpoops/policy.toml` or an explicit path.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::Config;
use crate::kind::Kind;

/// One `[[status]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPolicyEntry {
    pub code: u16,
    pub retryable: bool,
    /// Wait in milliseconds; 0 or missing falls back to `default_wait_ms`.
    #[serde(default)]
    pub wait_ms: u64,
}

/// One `[[kind]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindPolicyEntry {
    pub kind: Kind,
    pub retryable: bool,
    #[serde(default)]
    pub wait_ms: u64,
}

/// Serializable form of the override part of a [`Config`].
///
/// Content checks are code and have no file representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyFile {
    /// Default wait in milliseconds (None = built-in 1s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_wait_ms: Option<u64>,
    #[serde(default, rename = "status", skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<StatusPolicyEntry>,
    #[serde(default, rename = "kind", skip_serializing_if = "Vec::is_empty")]
    pub kind: Vec<KindPolicyEntry>,
}

impl PolicyFile {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("invalid policy file")
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Layer these entries onto `cfg`. Later entries win over earlier ones.
    pub fn apply(&self, mut cfg: Config) -> Config {
        if let Some(ms) = self.default_wait_ms {
            cfg = cfg.with_default_wait(Duration::from_millis(ms));
        }
        for e in &self.status {
            cfg = cfg.with_status_policy(e.code, e.retryable, Duration::from_millis(e.wait_ms));
        }
        for e in &self.kind {
            cfg = cfg.with_kind_policy(e.kind, e.retryable, Duration::from_millis(e.wait_ms));
        }
        cfg
    }

    /// Export the overrides of `cfg`, sorted for stable output.
    pub fn from_config(cfg: &Config) -> Self {
        let mut status: Vec<StatusPolicyEntry> = cfg
            .status_policies()
            .map(|(code, p)| StatusPolicyEntry {
                code,
                retryable: p.retryable,
                wait_ms: millis(p.wait_time),
            })
            .collect();
        status.sort_by_key(|e| e.code);

        let mut kind: Vec<KindPolicyEntry> = cfg
            .kind_policies()
            .map(|(kind, p)| KindPolicyEntry {
                kind,
                retryable: p.retryable,
                wait_ms: millis(p.wait_time),
            })
            .collect();
        kind.sort_by_key(|e| e.kind.as_str());

        Self {
            default_wait_ms: Some(millis(cfg.default_wait())),
            status,
            kind,
        }
    }

    pub fn into_config(self) -> Config {
        self.apply(Config::new())
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

pub fn policy_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("httpoops")?;
    Ok(xdg_dirs.place_config_file("policy.toml")?)
}

/// Load the policy from an explicit file. The file must exist.
pub fn load_from(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read policy file {}", path.display()))?;
    let file = PolicyFile::from_toml_str(&data)
        .with_context(|| format!("failed to parse policy file {}", path.display()))?;
    Ok(file.into_config())
}

/// Load the policy from the XDG config dir, creating a default file if none exists.
pub fn load_or_init() -> Result<Config> {
    let path = policy_path()?;
    if !path.exists() {
        let default_cfg = Config::new();
        let toml = PolicyFile::from_config(&default_cfg).to_toml_string()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default policy at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

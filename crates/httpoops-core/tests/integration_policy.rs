//! Integration test: default policy file creation under `XDG_CONFIG_HOME`.
//!
//! Lives in its own test binary because it points the process environment
//! at a temporary config dir.

use httpoops_core::config::{load_or_init, policy_path, PolicyFile};
use httpoops_core::Kind;
use std::fs;
use std::time::Duration;

#[test]
fn load_or_init_writes_default_file_then_reads_it_back() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", dir.path());

    let path = policy_path().unwrap();
    assert!(path.starts_with(dir.path()));
    assert!(path.ends_with("httpoops/policy.toml"));
    assert!(!path.exists());

    let cfg = load_or_init().unwrap();
    assert_eq!(cfg.default_wait(), Duration::from_secs(1));
    assert!(path.exists());

    let written = PolicyFile::from_toml_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written.default_wait_ms, Some(1000));
    assert!(written.status.is_empty());
    assert!(written.kind.is_empty());

    // Second call reads the existing file instead of overwriting it.
    fs::write(&path, "default_wait_ms = 250\n\n[[kind]]\nkind = \"NETWORK\"\nretryable = false\n").unwrap();
    let cfg = load_or_init().unwrap();
    assert_eq!(cfg.default_wait(), Duration::from_millis(250));
    assert!(!cfg.kind_policy(Kind::Network).unwrap().retryable);
}

//! Classification policy: per-status and per-kind overrides, default wait,
//! and content checks.
//!
//! A `Config` is built once with the `with_*` setters and then shared
//! read-only across classification calls. Clone it to get an independent
//! snapshot.

mod file;

pub use file::{load_from, load_or_init, policy_path, KindPolicyEntry, PolicyFile, StatusPolicyEntry};

use crate::kind::Kind;
use crate::oops::Oops;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default wait applied when no override provides a non-zero wait.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(1);

/// Retry override for a status code or a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub retryable: bool,
    /// Zero means "use the config's default wait".
    pub wait_time: Duration,
}

/// Inspects `(content_type, body)` and returns a record to override
/// classification, or `None` to fall through to the status-code rules.
pub type ContentCheck = Arc<dyn Fn(&str, &[u8]) -> Option<Oops> + Send + Sync>;

#[derive(Clone)]
pub struct Config {
    status_policies: HashMap<u16, Policy>,
    kind_policies: HashMap<Kind, Policy>,
    default_wait: Duration,
    content_checks: HashMap<u16, ContentCheck>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            status_policies: HashMap::new(),
            kind_policies: HashMap::new(),
            default_wait: DEFAULT_WAIT,
            content_checks: HashMap::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override retry behavior for an exact status code. Last write wins.
    pub fn with_status_policy(mut self, code: u16, retryable: bool, wait_time: Duration) -> Self {
        self.status_policies.insert(code, Policy { retryable, wait_time });
        self
    }

    /// Override retry behavior for a fault kind. Last write wins.
    pub fn with_kind_policy(mut self, kind: Kind, retryable: bool, wait_time: Duration) -> Self {
        self.kind_policies.insert(kind, Policy { retryable, wait_time });
        self
    }

    pub fn with_default_wait(mut self, wait_time: Duration) -> Self {
        self.default_wait = wait_time;
        self
    }

    /// Register a content check for responses with the given status code.
    pub fn with_content_check<F>(mut self, code: u16, check: F) -> Self
    where
        F: Fn(&str, &[u8]) -> Option<Oops> + Send + Sync + 'static,
    {
        self.content_checks.insert(code, Arc::new(check));
        self
    }

    pub fn status_policy(&self, code: u16) -> Option<&Policy> {
        self.status_policies.get(&code)
    }

    pub fn kind_policy(&self, kind: Kind) -> Option<&Policy> {
        self.kind_policies.get(&kind)
    }

    pub fn default_wait(&self) -> Duration {
        self.default_wait
    }

    pub fn content_check(&self, code: u16) -> Option<&ContentCheck> {
        self.content_checks.get(&code)
    }

    pub(crate) fn status_policies(&self) -> impl Iterator<Item = (u16, &Policy)> {
        self.status_policies.iter().map(|(c, p)| (*c, p))
    }

    pub(crate) fn kind_policies(&self) -> impl Iterator<Item = (Kind, &Policy)> {
        self.kind_policies.iter().map(|(k, p)| (*k, p))
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut checks: Vec<u16> = self.content_checks.keys().copied().collect();
        checks.sort_unstable();
        f.debug_struct("Config")
            .field("status_policies", &self.status_policies)
            .field("kind_policies", &self.kind_policies)
            .field("default_wait", &self.default_wait)
            .field("content_checks", &checks)
            .finish()
    }
}

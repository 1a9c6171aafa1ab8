//! Classification engine.
//!
//! [`detect`] turns one HTTP exchange (a response or a transport error) into
//! an [`Oops`]. Rules are tried in order, first match wins:
//!
//! 1. transport error: ordered probes over the error chain (see [`probe`]);
//! 2. content check registered for the response status;
//! 3. status code >= 400: `Http` with a status-dependent default;
//! 4. otherwise `Success`.
//!
//! The engine is pure: it reads the config and never mutates anything.

pub mod probe;
mod status;

pub use status::default_retryable;

use crate::config::Config;
use crate::kind::Kind;
use crate::oops::{Cause, Oops};
use crate::response::Response;
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

/// Classify one exchange.
///
/// Always returns a record; the success path yields an explicit
/// [`Kind::Success`] record (see [`crate::Detective`] for the variant that
/// returns `None` on success).
pub fn detect(cfg: &Config, outcome: Result<&Response, &Cause>) -> Oops {
    let resp = match outcome {
        Ok(resp) => resp,
        Err(cause) => return detect_transport(cfg, cause),
    };

    let status = resp.status();
    let content_type = resp.content_type();

    if let Some(check) = cfg.content_check(status) {
        if let Some(oops) = check(content_type, resp.body()) {
            tracing::debug!("content check for status {} classified response as {}", status, oops.kind);
            return oops;
        }
    }

    if status >= 400 {
        return detect_http(cfg, status, content_type);
    }

    Oops::new(Kind::Success, status, false, None).with_content_type(content_type)
}

fn detect_transport(cfg: &Config, cause: &Cause) -> Oops {
    let err: &(dyn StdError + 'static) = &**cause;
    let (kind, default_retryable) = probe::classify(err);
    let (retryable, wait_time) = apply_option(cfg, kind, 0, default_retryable);
    tracing::debug!(
        "transport error classified as {} (retryable={}, wait={:?}): {}",
        kind,
        retryable,
        wait_time,
        cause
    );
    Oops::new(kind, 0, retryable, Some(Arc::clone(cause))).with_wait_time(wait_time)
}

fn detect_http(cfg: &Config, status: u16, content_type: &str) -> Oops {
    let (retryable, wait_time) = apply_option(cfg, Kind::Http, status, default_retryable(status));
    tracing::debug!(
        "HTTP {} classified as {} (retryable={}, wait={:?})",
        status,
        Kind::Http,
        retryable,
        wait_time
    );
    Oops::new(Kind::Http, status, retryable, None)
        .with_wait_time(wait_time)
        .with_content_type(content_type)
}

/// Resolve `(retryable, wait_time)` for a classified failure.
///
/// Precedence: override for the exact status code (only when `status > 0`),
/// then override for `kind`, then `default_retryable`. An override with a
/// zero wait uses the config's default wait.
pub fn apply_option(cfg: &Config, kind: Kind, status: u16, default_retryable: bool) -> (bool, Duration) {
    let policy = (status > 0)
        .then(|| cfg.status_policy(status))
        .flatten()
        .or_else(|| cfg.kind_policy(kind));

    match policy {
        Some(p) => {
            let wait_time = if p.wait_time.is_zero() {
                cfg.default_wait()
            } else {
                p.wait_time
            };
            (p.retryable, wait_time)
        }
        None => (default_retryable, cfg.default_wait()),
    }
}

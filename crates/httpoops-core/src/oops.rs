//! Outcome record produced by one classification.

use crate::kind::Kind;
use serde::{Serialize, Serializer};
use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;

/// Shared handle to the error that caused a failed exchange.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Wrap any error as a [`Cause`].
pub fn cause<E>(err: E) -> Cause
where
    E: StdError + Send + Sync + 'static,
{
    Arc::new(err)
}

/// Structured outcome of an HTTP exchange.
#[derive(Debug, Clone, Serialize)]
pub struct Oops {
    pub kind: Kind,
    /// HTTP status code, or 0 when no response was received.
    pub status_code: u16,
    /// True if retrying may resolve the failure.
    pub retryable: bool,
    /// Suggested wait before the next attempt.
    #[serde(rename = "wait_ms", serialize_with = "serialize_millis")]
    pub wait_time: Duration,
    /// Error that caused the failure, if any.
    #[serde(serialize_with = "serialize_cause")]
    pub cause: Option<Cause>,
    /// Response `Content-Type`, empty when unavailable.
    pub content_type: String,
}

impl Oops {
    pub fn new(kind: Kind, status_code: u16, retryable: bool, cause: Option<Cause>) -> Self {
        Self {
            kind,
            status_code,
            retryable,
            wait_time: Duration::ZERO,
            cause,
            content_type: String::new(),
        }
    }

    pub fn success() -> Self {
        Self::new(Kind::Success, 0, false, None)
    }

    pub fn unknown() -> Self {
        Self::new(Kind::Unknown, 0, false, None)
    }

    pub fn with_wait_time(mut self, wait_time: Duration) -> Self {
        self.wait_time = wait_time;
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn is_success(&self) -> bool {
        self.kind.is_success()
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }
}

fn serialize_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

fn serialize_cause<S: Serializer>(c: &Option<Cause>, s: S) -> Result<S::Ok, S::Error> {
    match c {
        Some(c) => s.serialize_some(&c.to_string()),
        None => s.serialize_none(),
    }
}

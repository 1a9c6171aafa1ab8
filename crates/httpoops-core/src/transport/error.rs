//! Transport error type produced by the curl adapter.

use thiserror::Error;

/// Failure reported instead of a usable response.
///
/// Wrapped foreign errors are exposed through `source()` so the classifier
/// can find them anywhere in the chain.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error("request canceled")]
    Canceled,

    /// The async deadline around a blocking fetch elapsed.
    #[error("fetch deadline elapsed")]
    Elapsed(#[source] tokio::time::error::Elapsed),

    /// The blocking fetch task was cancelled or panicked.
    #[error("fetch task failed")]
    Join(#[source] tokio::task::JoinError),

    #[error("lookup {host}: {}", dns_reason(.not_found))]
    Dns { host: String, not_found: bool },

    /// Connect, read or write failed on an established path.
    #[error("{op}: {source}")]
    Op {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid url")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("curl")]
    Curl(#[from] curl::Error),

    /// Generic network failure that only knows whether it was a timeout.
    #[error("{message}")]
    Net { message: String, timeout: bool },
}

fn dns_reason(not_found: &bool) -> &'static str {
    if *not_found {
        "no such host"
    } else {
        "temporary failure in name resolution"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn dns_message_reflects_not_found() {
        let e = TransportError::Dns { host: "nope.invalid".into(), not_found: true };
        assert_eq!(e.to_string(), "lookup nope.invalid: no such host");
        let e = TransportError::Dns { host: "flaky.example".into(), not_found: false };
        assert!(e.to_string().ends_with("temporary failure in name resolution"));
    }

    #[test]
    fn wrapped_errors_are_reachable_as_source() {
        let e = TransportError::from(curl::Error::new(7));
        let src = e.source().unwrap();
        assert!(src.downcast_ref::<curl::Error>().is_some());

        let e = TransportError::from(url::Url::parse("not a url").unwrap_err());
        assert!(e.source().unwrap().downcast_ref::<url::ParseError>().is_some());
    }
}

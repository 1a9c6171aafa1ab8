//! Single-shot HTTP GET over libcurl.
//!
//! Produces the classifier's input: a [`Response`] or a [`TransportError`].
//! Never retries; callers feed the result to [`crate::detect`] and run their
//! own retry loop.

mod error;

pub use error::TransportError;

use crate::response::Response;
use std::str;
use std::time::Duration;

/// Largest timeout handed to curl; it stores milliseconds in a C `long`.
const MAX_CURL_TIMEOUT: Duration = Duration::from_millis(i32::MAX as u64);

/// Grace added on top of `timeout` for the outer deadline in [`fetch_async`].
const DEADLINE_GRACE: Duration = Duration::from_secs(1);

/// Request settings for [`fetch`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    /// Whole-transfer timeout enforced by curl. Zero means no limit.
    pub timeout: Duration,
    /// Outer deadline for [`fetch_async`]. `None` derives it from `timeout`
    /// plus one second, or no deadline at all when `timeout` is zero.
    pub deadline: Option<Duration>,
    pub follow_redirects: bool,
    /// Extra request headers as `(name, value)`.
    pub headers: Vec<(String, String)>,
}

impl FetchOptions {
    /// Outer deadline applied by [`fetch_async`], if any.
    pub fn effective_deadline(&self) -> Option<Duration> {
        match self.deadline {
            Some(d) => Some(d),
            None if self.timeout.is_zero() => None,
            None => Some(self.timeout.saturating_add(DEADLINE_GRACE)),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            deadline: None,
            follow_redirects: true,
            headers: Vec::new(),
        }
    }
}

/// Performs one GET request and collects status, headers and body.
///
/// Runs in the current thread; use [`fetch_async`] from async code.
pub fn fetch(url: &str, opts: &FetchOptions) -> Result<Response, TransportError> {
    let parsed = url::Url::parse(url)?;
    if parsed.host_str().is_none() {
        return Err(TransportError::InvalidRequest(format!("url has no host: {}", url)));
    }

    let mut header_lines: Vec<String> = Vec::new();
    let mut body: Vec<u8> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(parsed.as_str())?;
    easy.follow_location(opts.follow_redirects)?;
    easy.connect_timeout(opts.connect_timeout.min(MAX_CURL_TIMEOUT))?;
    easy.timeout(opts.timeout.min(MAX_CURL_TIMEOUT))?;

    if !opts.headers.is_empty() {
        let mut list = curl::easy::List::new();
        for (k, v) in &opts.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                header_lines.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    let status = u16::try_from(code)
        .map_err(|_| TransportError::InvalidRequest(format!("status code out of range: {}", code)))?;
    tracing::debug!("GET {} -> {} ({} body bytes)", url, status, body.len());

    Ok(Response::from_header_lines(status, &header_lines, body))
}

/// Like [`fetch`] but runs on tokio's blocking pool under the outer deadline
/// from [`FetchOptions::effective_deadline`].
pub async fn fetch_async(url: String, opts: FetchOptions) -> Result<Response, TransportError> {
    let deadline = opts.effective_deadline();
    let handle = tokio::task::spawn_blocking(move || fetch(&url, &opts));
    let joined = match deadline {
        Some(d) => tokio::time::timeout(d, handle)
            .await
            .map_err(TransportError::Elapsed)?,
        None => handle.await,
    };
    joined.map_err(TransportError::Join)?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_url_fails_before_curl() {
        let err = fetch("::not-a-url::", &FetchOptions::default()).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[test]
    fn url_without_host_is_rejected() {
        let err = fetch("mailto:ops@example.com", &FetchOptions::default()).unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest(_)));
    }

    #[test]
    fn default_options() {
        let opts = FetchOptions::default();
        assert_eq!(opts.connect_timeout, Duration::from_secs(15));
        assert_eq!(opts.timeout, Duration::from_secs(30));
        assert_eq!(opts.deadline, None);
        assert!(opts.follow_redirects);
        assert!(opts.headers.is_empty());
    }

    #[test]
    fn deadline_adds_grace_to_timeout() {
        let opts = FetchOptions::default();
        assert_eq!(opts.effective_deadline(), Some(Duration::from_secs(31)));
    }

    #[test]
    fn zero_timeout_has_no_outer_deadline() {
        let opts = FetchOptions {
            timeout: Duration::ZERO,
            ..FetchOptions::default()
        };
        assert_eq!(opts.effective_deadline(), None);
    }

    #[test]
    fn explicit_deadline_wins() {
        let opts = FetchOptions {
            timeout: Duration::ZERO,
            deadline: Some(Duration::from_millis(200)),
            ..FetchOptions::default()
        };
        assert_eq!(opts.effective_deadline(), Some(Duration::from_millis(200)));
    }

    #[test]
    fn huge_timeout_saturates_instead_of_overflowing() {
        let opts = FetchOptions {
            timeout: Duration::from_secs(u64::MAX),
            ..FetchOptions::default()
        };
        assert_eq!(opts.effective_deadline(), Some(Duration::MAX));
    }

    #[tokio::test]
    async fn fetch_async_with_huge_timeout_returns_error_not_panic() {
        let opts = FetchOptions {
            timeout: Duration::from_secs(u64::MAX),
            connect_timeout: Duration::from_secs(u64::MAX),
            ..FetchOptions::default()
        };
        let err = fetch_async("::not-a-url::".to_string(), opts).await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }
}

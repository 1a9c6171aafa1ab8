//! Default retry policy for HTTP status codes >= 400.

/// Whether a failing status code is worth retrying when no override applies.
///
/// Server-class faults are presumed transient, client-class faults permanent,
/// with explicit exceptions for throttling and request timeouts.
pub fn default_retryable(code: u16) -> bool {
    match code {
        // 429 Too Many Requests, 408 Request Timeout
        429 | 408 => true,
        // 502 Bad Gateway, 503 Service Unavailable, 504 Gateway Timeout
        502 | 503 | 504 => true,
        500 => true,
        // 400 Bad Request, 401 Unauthorized, 403 Forbidden
        400 | 401 | 403 => false,
        // 404 Not Found, 409 Conflict, 422 Unprocessable Entity
        404 | 409 | 422 => false,
        _ => code >= 500,
    }
}

//! Ordered inspection of transport errors.
//!
//! Each probe recognises one family of failures across every error type it
//! knows about. Probes run in order and each one walks the whole error chain
//! before the next is tried, so a specific subtype buried inside a wrapper
//! still beats a broader match on the wrapper itself.

use crate::kind::Kind;
use crate::transport::TransportError;
use std::error::Error as StdError;
use std::io;

type ErrRef<'a> = &'a (dyn StdError + 'static);

struct Probe {
    name: &'static str,
    /// `Some(retryable)` if this error belongs to the probe's family.
    test: fn(ErrRef<'_>) -> Option<bool>,
}

const PROBES: [Probe; 5] = [
    Probe { name: "deadline", test: deadline_or_canceled },
    Probe { name: "dns", test: name_resolution },
    Probe { name: "op", test: connection_op },
    Probe { name: "request", test: malformed_request },
    Probe { name: "timeout", test: timeout_capable },
];

/// Classify a transport error into a kind and its default retryability.
pub fn classify(err: ErrRef<'_>) -> (Kind, bool) {
    for probe in &PROBES {
        if let Some(retryable) = chain(err).find_map(probe.test) {
            tracing::trace!("transport error matched {} probe (retryable={})", probe.name, retryable);
            return (Kind::Network, retryable);
        }
    }
    (Kind::Unknown, false)
}

fn chain<'a>(err: ErrRef<'a>) -> impl Iterator<Item = ErrRef<'a>> {
    std::iter::successors(Some(err), |e| next_in_chain(*e))
}

// io::Error::source() skips the wrapped error itself, so descend via get_ref.
fn next_in_chain<'a>(err: ErrRef<'a>) -> Option<ErrRef<'a>> {
    if let Some(io_err) = err.downcast_ref::<io::Error>() {
        if let Some(inner) = io_err.get_ref() {
            return Some(inner as ErrRef<'a>);
        }
    }
    err.source()
}

fn deadline_or_canceled(err: ErrRef<'_>) -> Option<bool> {
    if let Some(e) = err.downcast_ref::<TransportError>() {
        return matches!(e, TransportError::DeadlineExceeded | TransportError::Canceled).then_some(true);
    }
    if err.is::<tokio::time::error::Elapsed>() {
        return Some(true);
    }
    if let Some(e) = err.downcast_ref::<tokio::task::JoinError>() {
        return e.is_cancelled().then_some(true);
    }
    if let Some(e) = err.downcast_ref::<curl::Error>() {
        return (e.is_operation_timedout() || e.is_aborted_by_callback()).then_some(true);
    }
    None
}

fn name_resolution(err: ErrRef<'_>) -> Option<bool> {
    if let Some(TransportError::Dns { not_found, .. }) = err.downcast_ref::<TransportError>() {
        return Some(!not_found);
    }
    if let Some(e) = err.downcast_ref::<curl::Error>() {
        // curl reports an unresolvable host as a single code; treat it as "no such host".
        if e.is_couldnt_resolve_host() {
            return Some(false);
        }
        if e.is_couldnt_resolve_proxy() {
            return Some(true);
        }
    }
    None
}

fn connection_op(err: ErrRef<'_>) -> Option<bool> {
    if let Some(TransportError::Op { .. }) = err.downcast_ref::<TransportError>() {
        return Some(true);
    }
    if let Some(e) = err.downcast_ref::<curl::Error>() {
        let op = e.is_couldnt_connect()
            || e.is_read_error()
            || e.is_recv_error()
            || e.is_send_error()
            || e.is_write_error()
            || e.is_got_nothing()
            || e.is_ssl_connect_error();
        return op.then_some(true);
    }
    if let Some(e) = err.downcast_ref::<io::Error>() {
        let op = matches!(
            e.kind(),
            io::ErrorKind::ConnectionRefused
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::ConnectionAborted
                | io::ErrorKind::NotConnected
                | io::ErrorKind::BrokenPipe
                | io::ErrorKind::AddrInUse
                | io::ErrorKind::AddrNotAvailable
                | io::ErrorKind::UnexpectedEof
        );
        return op.then_some(true);
    }
    None
}

fn malformed_request(err: ErrRef<'_>) -> Option<bool> {
    if let Some(e) = err.downcast_ref::<TransportError>() {
        return matches!(e, TransportError::InvalidUrl(_) | TransportError::InvalidRequest(_)).then_some(true);
    }
    if err.is::<url::ParseError>() {
        return Some(true);
    }
    if let Some(e) = err.downcast_ref::<curl::Error>() {
        return (e.is_url_malformed() || e.is_unsupported_protocol()).then_some(true);
    }
    None
}

fn timeout_capable(err: ErrRef<'_>) -> Option<bool> {
    if let Some(TransportError::Net { timeout, .. }) = err.downcast_ref::<TransportError>() {
        return Some(*timeout);
    }
    // Only socket-level io kinds; file or generic io errors stay unclassified.
    if let Some(e) = err.downcast_ref::<io::Error>() {
        return match e.kind() {
            io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Some(true),
            io::ErrorKind::Interrupted => Some(false),
            _ => None,
        };
    }
    if let Some(e) = err.downcast_ref::<curl::Error>() {
        return Some(e.is_operation_timedout());
    }
    None
}

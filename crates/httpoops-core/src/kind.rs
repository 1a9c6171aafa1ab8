//! Fault taxonomy: the closed set of outcome categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category of an HTTP exchange outcome.
///
/// `Parse`, `Block` and `Business` are never produced by the engine itself;
/// they exist for content checks to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Kind {
    /// Unclassified transport failure.
    Unknown,
    /// Network-level failure (timeout, DNS, connect/read/write, bad request URL).
    Network,
    /// Remote reported a fault through a status code >= 400.
    Http,
    /// Response could not be parsed (bad JSON, unexpected content type).
    Parse,
    /// Request was blocked (captcha, WAF page, login redirect).
    Block,
    /// Transport and HTTP succeeded but the payload reports a business failure.
    Business,
    /// No fault.
    Success,
}

/// Returned when parsing a string that is not one of the known kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fault kind: {0:?}")]
pub struct UnknownKind(pub String);

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::Unknown,
        Kind::Network,
        Kind::Http,
        Kind::Parse,
        Kind::Block,
        Kind::Business,
        Kind::Success,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Unknown => "UNKNOWN",
            Kind::Network => "NETWORK",
            Kind::Http => "HTTP",
            Kind::Parse => "PARSE",
            Kind::Block => "BLOCK",
            Kind::Business => "BUSINESS",
            Kind::Success => "SUCCESS",
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Kind::Unknown
    }

    pub fn is_network(&self) -> bool {
        *self == Kind::Network
    }

    pub fn is_http(&self) -> bool {
        *self == Kind::Http
    }

    pub fn is_parse(&self) -> bool {
        *self == Kind::Parse
    }

    pub fn is_block(&self) -> bool {
        *self == Kind::Block
    }

    pub fn is_business(&self) -> bool {
        *self == Kind::Business
    }

    pub fn is_success(&self) -> bool {
        *self == Kind::Success
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

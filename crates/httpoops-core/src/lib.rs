//! Classify HTTP exchanges into fault kinds and recommend whether to retry
//! and how long to wait.
//!
//! ```
//! use httpoops_core::{detect, Config, Kind, Response};
//! use std::time::Duration;
//!
//! let cfg = Config::new().with_status_policy(403, true, Duration::from_secs(2));
//! let oops = detect(&cfg, Ok(&Response::new(403)));
//! assert_eq!(oops.kind, Kind::Http);
//! assert!(oops.retryable);
//! assert_eq!(oops.wait_time, Duration::from_secs(2));
//! ```

pub mod config;
pub mod detect;
pub mod detective;
pub mod kind;
pub mod logging;
pub mod oops;
pub mod response;
pub mod transport;

pub use config::{Config, ContentCheck, Policy};
pub use detect::{apply_option, detect};
pub use detective::Detective;
pub use kind::{Kind, UnknownKind};
pub use oops::{cause, Cause, Oops};
pub use response::Response;
pub use transport::{fetch, fetch_async, FetchOptions, TransportError};

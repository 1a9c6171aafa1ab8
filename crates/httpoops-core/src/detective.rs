//! Config-owning wrapper around [`detect`](crate::detect::detect) that
//! reports success as `None`.

use crate::config::Config;
use crate::detect::detect;
use crate::oops::{Cause, Oops};
use crate::response::Response;
use std::error::Error as StdError;
use std::sync::Arc;

/// Holds one policy snapshot and classifies transport results against it.
#[derive(Debug, Clone)]
pub struct Detective {
    cfg: Arc<Config>,
}

impl Detective {
    pub fn new(cfg: Config) -> Self {
        Self { cfg: Arc::new(cfg) }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Classify a transport result.
    ///
    /// Returns the response (if any) together with the failure record, which
    /// is `None` when the exchange succeeded.
    pub fn detect<E>(&self, outcome: Result<Response, E>) -> (Option<Response>, Option<Oops>)
    where
        E: StdError + Send + Sync + 'static,
    {
        match outcome {
            Ok(resp) => {
                let oops = detect(&self.cfg, Ok(&resp));
                (Some(resp), (!oops.is_success()).then_some(oops))
            }
            Err(err) => {
                let cause: Cause = Arc::new(err);
                (None, Some(detect(&self.cfg, Err(&cause))))
            }
        }
    }
}

//! Failure-isolating fetch driver.

use std::marker::PhantomData;

use serde_json::Value;
use tracing::warn;

use super::{Endpoint, FetchError};

/// A pane that can be refreshed from an endpoint's JSON body.
pub trait PollTarget {
    /// Short name used in log records.
    const NAME: &'static str;

    type Update;

    /// Pulls the pane's payload out of a response body.
    ///
    /// `Ok(None)` means the body carried nothing to show; the pane keeps its
    /// previous contents. `Err` means the body was malformed.
    fn extract(body: Value) -> Result<Option<Self::Update>, serde_json::Error>;

    fn apply(&mut self, update: Self::Update);
}

/// Result of one poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// New data reached the pane.
    Updated,
    /// The response was valid but empty; the pane is unchanged.
    NoUpdate,
    /// Fetch or decode failed; the pane is unchanged.
    Failed(FetchError),
}

/// Drives one endpoint for one pane.
///
/// Errors never reach the pane: they are logged and reported through
/// [`PollOutcome::Failed`], and the next poll starts from scratch.
pub struct Poller<P: PollTarget> {
    endpoint: Box<dyn Endpoint>,
    attempts: u64,
    consecutive_failures: u64,
    _target: PhantomData<fn(&mut P)>,
}

impl<P: PollTarget> Poller<P> {
    pub fn new(endpoint: Box<dyn Endpoint>) -> Self {
        Self {
            endpoint,
            attempts: 0,
            consecutive_failures: 0,
            _target: PhantomData,
        }
    }

    pub fn poll(&mut self, target: &mut P) -> PollOutcome {
        self.attempts += 1;

        let result = self
            .endpoint
            .fetch()
            .and_then(|body| P::extract(body).map_err(|e| FetchError::Decode(e.to_string())));

        match result {
            Ok(Some(update)) => {
                target.apply(update);
                self.consecutive_failures = 0;
                PollOutcome::Updated
            }
            Ok(None) => {
                self.consecutive_failures = 0;
                PollOutcome::NoUpdate
            }
            Err(e) => {
                self.consecutive_failures += 1;
                warn!(
                    pane = P::NAME,
                    endpoint = %self.endpoint.describe(),
                    failures = self.consecutive_failures,
                    "poll failed: {}",
                    e
                );
                PollOutcome::Failed(e)
            }
        }
    }

    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn consecutive_failures(&self) -> u64 {
        self.consecutive_failures
    }
}

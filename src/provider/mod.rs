//! Data sources for the dashboard panes.
//!
//! An [`Endpoint`] performs one blocking fetch and hands back the decoded
//! JSON body. A [`Poller`] drives an endpoint on behalf of one pane and
//! keeps failures away from the widgets.

mod http;
mod poller;
#[cfg(test)]
pub(crate) mod testing;

pub use http::{ACTIVE_APP_STATES, FETCH_TIMEOUT, HttpEndpoint};
pub use poller::{PollOutcome, PollTarget, Poller};

use serde_json::Value;
use thiserror::Error;

/// Reasons a single fetch can fail. None of them are fatal to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout and the like.
    #[error("transport error: {0}")]
    Transport(String),
    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    /// The body was not JSON, or not the shape the pane expects.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// A blocking source of JSON documents.
///
/// The trait is object-safe and used as `Box<dyn Endpoint>` so tests can
/// substitute scripted responses for the network.
pub trait Endpoint {
    /// Fetches and decodes one document.
    fn fetch(&mut self) -> Result<Value, FetchError>;

    /// Human-readable location, used in log records.
    fn describe(&self) -> &str;
}

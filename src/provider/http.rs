//! HTTP endpoints of the YARN resource manager REST API.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use super::{Endpoint, FetchError};

/// Upper bound on a single request, connect included.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Application states listed in the apps pane.
pub const ACTIVE_APP_STATES: &str = "NEW,NEW_SAVING,SUBMITTED,ACCEPTED,RUNNING";

const CLUSTER_METRICS_PATH: &str = "/ws/v1/cluster/metrics";
const CLUSTER_APPS_PATH: &str = "/ws/v1/cluster/apps";

/// GET endpoint returning a JSON document.
///
/// The underlying client is built on first use and reused afterwards.
pub struct HttpEndpoint {
    url: String,
    query: Vec<(&'static str, String)>,
    timeout: Duration,
    client: Option<Client>,
}

impl HttpEndpoint {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            timeout,
            client: None,
        }
    }

    pub fn with_query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }

    /// `{base}/ws/v1/cluster/metrics`
    pub fn cluster_metrics(base_uri: &str) -> Self {
        Self::new(join(base_uri, CLUSTER_METRICS_PATH), FETCH_TIMEOUT)
    }

    /// `{base}/ws/v1/cluster/apps?states=...` restricted to active applications.
    pub fn cluster_apps(base_uri: &str) -> Self {
        Self::new(join(base_uri, CLUSTER_APPS_PATH), FETCH_TIMEOUT)
            .with_query("states", ACTIVE_APP_STATES)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn client(&mut self) -> Result<Client, FetchError> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        self.client = Some(client.clone());
        Ok(client)
    }
}

impl Endpoint for HttpEndpoint {
    fn fetch(&mut self) -> Result<Value, FetchError> {
        let client = self.client()?;
        debug!(url = %self.url, "GET");

        let response = client
            .get(&self.url)
            .query(&self.query)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn describe(&self) -> &str {
        &self.url
    }
}

fn join(base_uri: &str, path: &str) -> String {
    format!("{}{}", base_uri.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let metrics = HttpEndpoint::cluster_metrics("http://rm:8088");
        assert_eq!(metrics.url(), "http://rm:8088/ws/v1/cluster/metrics");

        let apps = HttpEndpoint::cluster_apps("http://rm:8088/");
        assert_eq!(apps.url(), "http://rm:8088/ws/v1/cluster/apps");
        assert_eq!(apps.query, vec![("states", ACTIVE_APP_STATES.to_string())]);
        assert_eq!(apps.timeout, FETCH_TIMEOUT);
    }

    #[test]
    fn test_unreachable_host_is_transport_error() {
        // Port 9 on localhost (discard) is closed on any sane test machine.
        let mut endpoint = HttpEndpoint::new(
            "http://127.0.0.1:9/ws/v1/cluster/metrics",
            Duration::from_millis(500),
        );
        match endpoint.fetch() {
            Err(FetchError::Transport(_)) => {}
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}

//! Application records from `/ws/v1/cluster/apps`.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One listed application, field by field.
///
/// Values are kept raw; column formatters decide how to display them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AppRecord(Map<String, Value>);

impl AppRecord {
    /// Returns the raw value of `field`, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl From<Map<String, Value>> for AppRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[derive(Deserialize)]
struct AppsResponse {
    apps: Option<AppList>,
}

#[derive(Deserialize)]
struct AppList {
    #[serde(default)]
    app: Option<Vec<AppRecord>>,
}

/// Extracts the application list from a response body.
///
/// Returns `Ok(None)` when the listing is absent, null or empty; the
/// previously displayed rows stay on screen in that case.
pub fn apps_from_response(body: Value) -> Result<Option<Vec<AppRecord>>, serde_json::Error> {
    if !body.is_object() {
        return Ok(None);
    }
    let response: AppsResponse = serde_json::from_value(body)?;
    let apps = response
        .apps
        .and_then(|list| list.app)
        .filter(|apps| !apps.is_empty());
    Ok(apps)
}

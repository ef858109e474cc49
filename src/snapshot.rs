use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::{Value, json};

use crate::config::PlatformConfig;
use crate::domain::DatasetId;
use crate::error::FetchError;

const SNAPSHOT_QUERY: &str = "query ($id: ID!) { dataset(id: $id) { snapshots { tag } } }";

pub trait SnapshotClient: Send + Sync {
    fn snapshot_tags(&self, id: &DatasetId) -> Result<Vec<String>, FetchError>;
}

#[derive(Clone)]
pub struct GraphqlSnapshotClient {
    client: Client,
    graphql_url: String,
}

impl GraphqlSnapshotClient {
    pub fn new(config: &PlatformConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("openneuro-fetch/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| FetchError::Http(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| FetchError::Http(err.to_string()))?;
        Ok(Self {
            client,
            graphql_url: config.graphql_url.clone(),
        })
    }
}

impl SnapshotClient for GraphqlSnapshotClient {
    fn snapshot_tags(&self, id: &DatasetId) -> Result<Vec<String>, FetchError> {
        let body = json!({
            "query": SNAPSHOT_QUERY,
            "variables": { "id": id.as_str() },
        });
        let response = self
            .client
            .post(&self.graphql_url)
            .json(&body)
            .send()
            .map_err(|err| FetchError::Http(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "GraphQL request failed".to_string());
            return Err(FetchError::Status { status, message });
        }
        let raw: Value = response
            .json()
            .map_err(|err| FetchError::Http(err.to_string()))?;
        extract_tags(&raw)
    }
}

/// Pull the snapshot tags out of a GraphQL response body.
pub fn extract_tags(raw: &Value) -> Result<Vec<String>, FetchError> {
    let snapshots = raw
        .get("data")
        .and_then(|v| v.get("dataset"))
        .and_then(|v| v.get("snapshots"))
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            FetchError::GraphqlShape("missing data.dataset.snapshots".to_string())
        })?;
    Ok(snapshots
        .iter()
        .filter_map(|snap| snap.get("tag").and_then(|v| v.as_str()))
        .map(|tag| tag.to_string())
        .collect())
}

/// Latest snapshot tag for a dataset.
///
/// "Latest" is the lexicographically greatest tag, matching the platform
/// convenience scripts: `"v10"` sorts before `"v9"`. This is plain string
/// ordering, not semantic-version ordering.
pub fn latest_snapshot(
    client: &impl SnapshotClient,
    id: &DatasetId,
) -> Result<String, FetchError> {
    let tags = client.snapshot_tags(id)?;
    tags.into_iter()
        .max()
        .ok_or_else(|| FetchError::NoSnapshots(id.to_string()))
}

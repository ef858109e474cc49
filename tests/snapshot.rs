use assert_matches::assert_matches;

use openneuro_fetch::domain::DatasetId;
use openneuro_fetch::error::FetchError;
use openneuro_fetch::snapshot::{SnapshotClient, latest_snapshot};

struct FixedTags(Vec<&'static str>);

impl SnapshotClient for FixedTags {
    fn snapshot_tags(&self, _id: &DatasetId) -> Result<Vec<String>, FetchError> {
        Ok(self.0.iter().map(|tag| tag.to_string()).collect())
    }
}

struct FailingClient;

impl SnapshotClient for FailingClient {
    fn snapshot_tags(&self, _id: &DatasetId) -> Result<Vec<String>, FetchError> {
        Err(FetchError::Status {
            status: 502,
            message: "bad gateway".to_string(),
        })
    }
}

fn dataset() -> DatasetId {
    "ds000001".parse().unwrap()
}

#[test]
fn picks_the_lexicographically_greatest_tag() {
    let client = FixedTags(vec!["1.0.0", "2.0.0", "1.5.0"]);
    assert_eq!(latest_snapshot(&client, &dataset()).unwrap(), "2.0.0");
}

#[test]
fn ordering_is_lexicographic_not_semver() {
    // "v10" < "v9" under plain string comparison.
    let client = FixedTags(vec!["v9", "v10"]);
    assert_eq!(latest_snapshot(&client, &dataset()).unwrap(), "v9");
}

#[test]
fn empty_tag_set_is_not_found() {
    let client = FixedTags(vec![]);
    assert_matches!(
        latest_snapshot(&client, &dataset()),
        Err(FetchError::NoSnapshots(id)) if id == "ds000001"
    );
}

#[test]
fn transport_failure_surfaces_unchanged() {
    assert_matches!(
        latest_snapshot(&FailingClient, &dataset()),
        Err(FetchError::Status { status: 502, .. })
    );
}

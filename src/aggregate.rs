use serde_json::Value;

use crate::domain::parse_dataset_url;
use crate::error::FetchError;
use crate::flatten::flatten_json;
use crate::s3::{self, ObjectStore};
use crate::table::MetadataTable;

/// Download every JSON sidecar of the dataset behind `dataset_url` and stack
/// the flattened documents into one table, one row per file.
///
/// Downloads run sequentially and the first failure aborts the whole
/// aggregation; there are no partial results. Rows land in listing order.
pub fn dataset_metadata_table(
    store: &impl ObjectStore,
    dataset_url: &str,
) -> Result<MetadataTable, FetchError> {
    let dataset_id = parse_dataset_url(dataset_url)?;
    tracing::info!(dataset = %dataset_id, "listing JSON sidecars");
    let listing = s3::list_json_files(store, &dataset_id)?;
    let total = listing.len();

    let mut table = MetadataTable::new();
    for (position, (key, url)) in listing.iter().enumerate() {
        tracing::info!(file = %key, "downloading {}/{total}", position + 1);
        let bytes = store.fetch_bytes(url)?;
        let document: Value =
            serde_json::from_slice(&bytes).map_err(|err| FetchError::JsonParse {
                file: key.clone(),
                message: err.to_string(),
            })?;
        table.push_record(key.clone(), flatten_json(&document));
    }
    Ok(table)
}

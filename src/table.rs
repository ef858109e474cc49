use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Reserved column holding the originating file key of each row.
pub const FILE_KEY_COLUMN: &str = "__file__";

static NULL: Value = Value::Null;

/// Row-per-file table of flattened sidecar metadata.
///
/// Rows keep their insertion order and are indexed by file key. Columns are
/// the union of flattened keys seen across all rows; a row that lacks a
/// column reads as JSON null.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    columns: BTreeSet<String>,
    rows: Vec<(String, Map<String, Value>)>,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_record(&mut self, file_key: impl Into<String>, record: Map<String, Value>) {
        for column in record.keys() {
            if column != FILE_KEY_COLUMN {
                self.columns.insert(column.clone());
            }
        }
        self.rows.push((file_key.into(), record));
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row index: the file keys, in insertion order.
    pub fn index(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(key, _)| key.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.as_str())
    }

    /// Cell lookup; absent cells and unknown rows read as null.
    pub fn cell(&self, file_key: &str, column: &str) -> &Value {
        self.rows
            .iter()
            .find(|(key, _)| key == file_key)
            .and_then(|(_, record)| record.get(column))
            .unwrap_or(&NULL)
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &Map<String, Value>)> {
        self.rows
            .iter()
            .map(|(key, record)| (key.as_str(), record))
    }

    /// One JSON object per row, with the file key under [`FILE_KEY_COLUMN`].
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|(key, record)| {
                let mut object = record.clone();
                object.insert(FILE_KEY_COLUMN.to_string(), Value::String(key.clone()));
                object
            })
            .collect()
    }
}

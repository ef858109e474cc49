use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Opaque dataset identifier on the platform (e.g. `ds000001`).
///
/// The only structure assumed is that the token is usable verbatim as a URL
/// path segment and as an object-storage prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatasetId(String);

impl DatasetId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage prefix under which all objects of this dataset live.
    pub fn prefix(&self) -> String {
        format!("{}/", self.0)
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DatasetId {
    type Err = FetchError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_string();
        let is_valid = !normalized.is_empty()
            && normalized.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(FetchError::InvalidDatasetId(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

/// Extract the dataset identifier from a canonical dataset page URL such as
/// `https://openneuro.org/datasets/ds000001/versions/1.0.0`.
///
/// The version segment, when present, is ignored: the storage listing is
/// unversioned.
pub fn parse_dataset_url(url: &str) -> Result<DatasetId, FetchError> {
    let rest = url
        .split_once("://")
        .map(|(_, rest)| rest)
        .ok_or_else(|| FetchError::InvalidDatasetUrl(url.to_string()))?;
    let path = rest.split_once('/').map(|(_, path)| path).unwrap_or("");
    let mut segments = path.trim_matches('/').split('/');
    match (segments.next(), segments.next()) {
        (Some("datasets"), Some(id)) => id
            .parse()
            .map_err(|_| FetchError::InvalidDatasetUrl(url.to_string())),
        _ => Err(FetchError::InvalidDatasetUrl(url.to_string())),
    }
}

/// Dimensional extents of a decoded imaging volume, e.g. `64x64x30`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeShape(pub Vec<u16>);

impl VolumeShape {
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    pub fn extents(&self) -> &[u16] {
        &self.0
    }
}

impl fmt::Display for VolumeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        write!(f, "{}", parts.join("x"))
    }
}

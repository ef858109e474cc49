use serde::{Deserialize, Serialize};

/// Endpoints of the data-sharing platform.
///
/// Held as an explicit value rather than module-level globals so tests and
/// mirrors can point the clients elsewhere. The bucket is public-read; no
/// credentials or request signing are involved anywhere in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub graphql_url: String,
    pub s3_endpoint: String,
    pub bucket: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            graphql_url: "https://openneuro.org/crn/graphql".to_string(),
            s3_endpoint: "https://s3.amazonaws.com".to_string(),
            bucket: "openneuro.org".to_string(),
        }
    }
}

impl PlatformConfig {
    /// Publicly derivable download URL for one stored object.
    pub fn object_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.s3_endpoint, self.bucket, key)
    }

    /// Base URL for bucket listing requests; query parameters are appended
    /// by the caller.
    pub fn list_url(&self) -> String {
        format!("{}/{}", self.s3_endpoint, self.bucket)
    }
}

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;

use crate::config::PlatformConfig;
use crate::domain::DatasetId;
use crate::error::FetchError;

pub const JSON_SUFFIX: &str = ".json";
pub const NIFTI_SUFFIX: &str = ".nii.gz";

/// Storage key mapped to its public download URL.
///
/// ListObjectsV2 returns keys in ascending UTF-8 order, so iterating the map
/// visits entries in the same order the store reported them.
pub type FileListing = BTreeMap<String, String>;

/// Seam over the public object store; mocked in tests.
pub trait ObjectStore: Send + Sync {
    fn list_objects(&self, id: &DatasetId, suffix: &str) -> Result<FileListing, FetchError>;
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// One page of a ListObjectsV2 response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListingPage {
    #[serde(default)]
    pub contents: Vec<ObjectEntry>,
    #[serde(default)]
    pub is_truncated: bool,
    pub next_continuation_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ObjectEntry {
    pub key: String,
}

pub fn parse_listing(xml: &str) -> Result<ListingPage, FetchError> {
    quick_xml::de::from_str(xml).map_err(|err| FetchError::ListingParse(err.to_string()))
}

/// Retain the page's keys that end in the exact suffix and derive their
/// download URLs. `.json.bak` never matches `.json`.
pub fn collect_page(
    listing: &mut FileListing,
    page: &ListingPage,
    suffix: &str,
    config: &PlatformConfig,
) {
    for entry in &page.contents {
        if entry.key.ends_with(suffix) {
            listing.insert(entry.key.clone(), config.object_url(&entry.key));
        }
    }
}

#[derive(Clone)]
pub struct S3HttpClient {
    client: Client,
    config: PlatformConfig,
}

impl S3HttpClient {
    pub fn new(config: &PlatformConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("openneuro-fetch/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| FetchError::Http(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|err| FetchError::Http(err.to_string()))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn fetch_page(
        &self,
        prefix: &str,
        token: Option<&str>,
    ) -> Result<ListingPage, FetchError> {
        let mut request = self
            .client
            .get(self.config.list_url())
            .query(&[("list-type", "2"), ("prefix", prefix)]);
        if let Some(token) = token {
            request = request.query(&[("continuation-token", token)]);
        }
        let response = request
            .send()
            .map_err(|err| FetchError::Http(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "listing request failed".to_string());
            return Err(FetchError::Status { status, message });
        }
        let body = response
            .text()
            .map_err(|err| FetchError::Http(err.to_string()))?;
        parse_listing(&body)
    }
}

impl ObjectStore for S3HttpClient {
    fn list_objects(&self, id: &DatasetId, suffix: &str) -> Result<FileListing, FetchError> {
        let prefix = id.prefix();
        let mut listing = FileListing::new();
        let mut token: Option<String> = None;
        loop {
            let page = self.fetch_page(&prefix, token.as_deref())?;
            collect_page(&mut listing, &page, suffix, &self.config);
            if !page.is_truncated {
                break;
            }
            match page.next_continuation_token {
                Some(next) => token = Some(next),
                None => {
                    return Err(FetchError::ListingParse(
                        "truncated page without continuation token".to_string(),
                    ));
                }
            }
        }
        tracing::info!(
            count = listing.len(),
            suffix,
            dataset = %id,
            "listed matching objects"
        );
        for key in listing.keys().take(10) {
            tracing::debug!(" - {key}");
        }
        Ok(listing)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| FetchError::Http(err.to_string()))?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "download failed".to_string());
            return Err(FetchError::Status { status, message });
        }
        let bytes = response
            .bytes()
            .map_err(|err| FetchError::Http(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// All `.json` sidecars of a dataset.
pub fn list_json_files(
    store: &impl ObjectStore,
    id: &DatasetId,
) -> Result<FileListing, FetchError> {
    store.list_objects(id, JSON_SUFFIX)
}

/// All `.nii.gz` imaging files of a dataset.
pub fn list_niigz_files(
    store: &impl ObjectStore,
    id: &DatasetId,
) -> Result<FileListing, FetchError> {
    store.list_objects(id, NIFTI_SUFFIX)
}

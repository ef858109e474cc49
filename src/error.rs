use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum FetchError {
    #[error("invalid dataset id: {0}")]
    InvalidDatasetId(String),

    #[error("invalid dataset url: {0}")]
    InvalidDatasetUrl(String),

    #[error("request failed: {0}")]
    Http(String),

    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("no snapshots found for dataset {0}")]
    NoSnapshots(String),

    #[error("unexpected GraphQL response shape: {0}")]
    GraphqlShape(String),

    #[error("failed to parse object listing: {0}")]
    ListingParse(String),

    #[error("failed to parse JSON file {file}: {message}")]
    JsonParse { file: String, message: String },

    #[error("failed to decompress gzip payload: {0}")]
    Gzip(String),

    #[error("failed to parse NIfTI header: {0}")]
    NiftiHeader(String),
}

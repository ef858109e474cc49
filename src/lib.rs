//! Convenience utilities for the OpenNeuro data-sharing platform.
//!
//! The crate resolves snapshot tags through the OpenNeuro GraphQL endpoint,
//! enumerates dataset files in the public S3 bucket, collects JSON sidecar
//! metadata into a [`table::MetadataTable`], reports the dimensional shape of
//! `.nii.gz` volumes without loading voxel data, and parses free-text age
//! fields into numbers.
//!
//! All network access goes through the [`s3::ObjectStore`] and
//! [`snapshot::SnapshotClient`] traits so callers can substitute their own
//! transports in tests.

pub mod age;
pub mod aggregate;
pub mod config;
pub mod domain;
pub mod error;
pub mod flatten;
pub mod s3;
pub mod snapshot;
pub mod table;
pub mod volume;

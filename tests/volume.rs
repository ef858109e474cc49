use std::collections::HashMap;
use std::io::Write;

use assert_matches::assert_matches;
use flate2::Compression;
use flate2::write::GzEncoder;

use openneuro_fetch::domain::DatasetId;
use openneuro_fetch::error::FetchError;
use openneuro_fetch::s3::{FileListing, ObjectStore};
use openneuro_fetch::volume::volume_shape_from_url;

struct MemoryStore {
    bodies: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    fn single(url: &str, body: Vec<u8>) -> Self {
        Self {
            bodies: HashMap::from([(url.to_string(), body)]),
        }
    }
}

impl ObjectStore for MemoryStore {
    fn list_objects(&self, _id: &DatasetId, _suffix: &str) -> Result<FileListing, FetchError> {
        Ok(FileListing::new())
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Http(format!("no route to {url}")))
    }
}

/// Minimal little-endian NIfTI-1 header: 348 bytes, magic `n+1\0`.
fn nifti_header_bytes(extents: &[u16]) -> Vec<u8> {
    let mut bytes = vec![0u8; 348];
    bytes[0..4].copy_from_slice(&348i32.to_le_bytes());
    let mut dim = [1u16; 8];
    dim[0] = extents.len() as u16;
    dim[1..=extents.len()].copy_from_slice(extents);
    for (i, d) in dim.iter().enumerate() {
        bytes[40 + 2 * i..42 + 2 * i].copy_from_slice(&d.to_le_bytes());
    }
    // datatype = float32, bitpix = 32, vox_offset past the header
    bytes[70..72].copy_from_slice(&16i16.to_le_bytes());
    bytes[72..74].copy_from_slice(&32i16.to_le_bytes());
    bytes[108..112].copy_from_slice(&352f32.to_le_bytes());
    bytes[344..348].copy_from_slice(b"n+1\0");
    bytes
}

fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

const URL: &str = "mem://ds000001/sub-01/anat/sub-01_T1w.nii.gz";

#[test]
fn reports_the_declared_shape() {
    let store = MemoryStore::single(URL, gzip(&nifti_header_bytes(&[64, 64, 30])));
    let shape = volume_shape_from_url(&store, URL).unwrap();
    assert_eq!(shape.ndim(), 3);
    assert_eq!(shape.extents(), &[64, 64, 30]);
    assert_eq!(shape.to_string(), "64x64x30");
}

#[test]
fn four_dimensional_volumes_keep_the_time_axis() {
    let store = MemoryStore::single(URL, gzip(&nifti_header_bytes(&[64, 64, 30, 120])));
    let shape = volume_shape_from_url(&store, URL).unwrap();
    assert_eq!(shape.extents(), &[64, 64, 30, 120]);
}

#[test]
fn trailing_voxel_payload_is_ignored() {
    let mut file = nifti_header_bytes(&[2, 2, 2]);
    file.extend_from_slice(&[0u8; 4 + 2 * 2 * 2 * 4]);
    let store = MemoryStore::single(URL, gzip(&file));
    let shape = volume_shape_from_url(&store, URL).unwrap();
    assert_eq!(shape.extents(), &[2, 2, 2]);
}

#[test]
fn non_gzip_payload_is_a_gzip_error() {
    let store = MemoryStore::single(URL, b"plainly not gzip".to_vec());
    assert_matches!(
        volume_shape_from_url(&store, URL),
        Err(FetchError::Gzip(_))
    );
}

#[test]
fn gzipped_garbage_is_a_header_error() {
    let store = MemoryStore::single(URL, gzip(&[0u8; 64]));
    assert_matches!(
        volume_shape_from_url(&store, URL),
        Err(FetchError::NiftiHeader(_))
    );
}

#[test]
fn fetch_failure_is_a_transport_error() {
    let store = MemoryStore::single(URL, gzip(&nifti_header_bytes(&[2, 2])));
    assert_matches!(
        volume_shape_from_url(&store, "mem://elsewhere.nii.gz"),
        Err(FetchError::Http(_))
    );
}

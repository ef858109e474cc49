use std::io::Read;

use flate2::read::GzDecoder;
use nifti::NiftiHeader;

use crate::domain::VolumeShape;
use crate::error::FetchError;
use crate::s3::ObjectStore;

/// Fetch a gzip-compressed NIfTI file and report the dimensional shape
/// declared in its header, without touching the voxel payload.
///
/// The whole payload is decompressed in memory before the header is parsed,
/// so peak memory is proportional to the decompressed file size.
pub fn volume_shape_from_url(
    store: &impl ObjectStore,
    url: &str,
) -> Result<VolumeShape, FetchError> {
    let compressed = store.fetch_bytes(url)?;
    let mut decompressed = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut decompressed)
        .map_err(|err| FetchError::Gzip(err.to_string()))?;
    let header = NiftiHeader::from_reader(decompressed.as_slice())
        .map_err(|err| FetchError::NiftiHeader(err.to_string()))?;
    // dim[0] is the number of dimensions; extents follow in dim[1..].
    let ndim = usize::from(header.dim[0].min(7));
    Ok(VolumeShape(header.dim[1..=ndim].to_vec()))
}

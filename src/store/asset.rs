//! Dataset asset files: the encoded payload stored as-is on disk.

use std::fs;
use std::path::Path;

use crate::codec::Codec;
use crate::shape::BlendShapeDataset;
use crate::util::Result;

/// Conventional asset file extension.
pub const ASSET_EXTENSION: &str = "bmasset";

/// Write an encoded payload.
pub fn write_asset(path: &Path, payload: &[u8]) -> Result<()> {
    fs::write(path, payload)?;
    Ok(())
}

/// Read an encoded payload.
pub fn read_asset(path: &Path) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}

/// Encode and write a dataset.
pub fn save_dataset(path: &Path, dataset: &BlendShapeDataset, codec: &Codec) -> Result<()> {
    let payload = codec.encode(dataset)?;
    write_asset(path, &payload)?;
    tracing::info!(path = %path.display(), bytes = payload.len(), "saved dataset asset");
    Ok(())
}

/// Read and decode a dataset.
pub fn load_dataset(path: &Path, codec: &Codec) -> Result<BlendShapeDataset> {
    codec.decode(&read_asset(path)?)
}

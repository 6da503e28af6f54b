//! Gzip compression for dataset payloads.
//!
//! Payloads are plain gzip streams. The header carries no timestamp or file
//! name, so equal input at equal level always yields equal bytes.

use std::io::{Read, Write};

use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::util::{Error, Result};

/// Gzip member magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Default compression level.
pub const DEFAULT_LEVEL: u32 = 6;

/// Compress data using gzip.
///
/// # Arguments
/// * `data` - Data to compress
/// * `level` - Compression level (0-9, clamped)
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::with_capacity(data.len() / 4), Compression::new(level.min(9)));
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a gzip stream.
///
/// Missing magic, truncated streams, checksum failures and bytes trailing
/// the gzip member are reported as [`Error::CorruptPayload`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if !is_compressed(data) {
        return Err(Error::corrupt("missing gzip header"));
    }

    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::with_capacity(data.len() * 4);
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| Error::corrupt(format!("decompression failed: {e}")))?;

    let rest = decoder.into_inner();
    if !rest.is_empty() {
        return Err(Error::corrupt(format!("{} bytes after end of gzip stream", rest.len())));
    }
    Ok(decompressed)
}

/// Check if data starts with the gzip magic bytes.
pub fn is_compressed(data: &[u8]) -> bool {
    data.len() >= 2 && data[..2] == GZIP_MAGIC
}

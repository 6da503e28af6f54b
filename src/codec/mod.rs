//! Dataset payload codec.
//!
//! A payload is a gzip stream of the dataset's JSON text (see [`wire`]).
//! Encoding is deterministic and `decode(encode(d)) == d` holds float-exact
//! for every valid dataset.

pub mod compression;
pub mod wire;

pub use compression::{is_compressed, DEFAULT_LEVEL, GZIP_MAGIC};
pub use wire::{from_json, to_json};

use crate::shape::BlendShapeDataset;
use crate::util::{Error, Result};

/// Payload encoder/decoder with a fixed compression level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Codec {
    level: u32,
}

impl Default for Codec {
    fn default() -> Self {
        Self { level: DEFAULT_LEVEL }
    }
}

impl Codec {
    /// Create a codec with the given gzip level (clamped to 0-9).
    pub fn new(level: u32) -> Self {
        Self { level: level.min(9) }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Serialize and compress a dataset.
    pub fn encode(&self, dataset: &BlendShapeDataset) -> Result<Vec<u8>> {
        let json = to_json(dataset, false)?;
        let bytes = compression::compress(json.as_bytes(), self.level)?;
        tracing::debug!(
            mesh = %dataset.mesh_name,
            shapes = dataset.len(),
            text = json.len(),
            compressed = bytes.len(),
            "encoded dataset"
        );
        Ok(bytes)
    }

    /// Decompress and parse a payload.
    pub fn decode(&self, bytes: &[u8]) -> Result<BlendShapeDataset> {
        let raw = compression::decompress(bytes)?;
        let text = String::from_utf8(raw).map_err(|e| Error::corrupt(format!("payload is not UTF-8: {e}")))?;
        from_json(&text)
    }
}

/// Encode with the default compression level.
pub fn encode(dataset: &BlendShapeDataset) -> Result<Vec<u8>> {
    Codec::default().encode(dataset)
}

/// Decode a payload produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<BlendShapeDataset> {
    Codec::default().decode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{DatasetShape, DeltaSet};
    use crate::util::Vec3;

    fn dataset(shapes: usize, vertices: usize) -> BlendShapeDataset {
        let mut ds = BlendShapeDataset::new("Face");
        for s in 0..shapes {
            let d = DeltaSet::new(
                (0..vertices).map(|i| Vec3::new(i as f32 * 0.013, -(s as f32), 1.0 / 3.0)).collect(),
                (0..vertices).map(|i| Vec3::splat(i as f32 * 1e-4)).collect(),
                vec![Vec3::ZERO; vertices],
            );
            ds.push(DatasetShape::new(format!("Shape{s}"), d));
        }
        ds
    }

    #[test]
    fn test_roundtrip() {
        for (shapes, vertices) in [(0, 0), (1, 0), (1, 7), (3, 64)] {
            let ds = dataset(shapes, vertices);
            let bytes = encode(&ds).unwrap();
            assert_eq!(bytes[..2], GZIP_MAGIC);
            assert_eq!(decode(&bytes).unwrap(), ds);
        }
    }

    #[test]
    fn test_deterministic() {
        let ds = dataset(2, 32);
        assert_eq!(encode(&ds).unwrap(), encode(&ds).unwrap());
    }

    #[test]
    fn test_levels_decode_alike() {
        let ds = dataset(2, 100);
        let fast = Codec::new(1).encode(&ds).unwrap();
        let best = Codec::new(9).encode(&ds).unwrap();
        assert_eq!(decode(&fast).unwrap(), decode(&best).unwrap());
        assert_eq!(Codec::new(42).level(), 9);
    }

    #[test]
    fn test_corrupt_payloads() {
        let bytes = encode(&dataset(1, 10)).unwrap();

        assert!(matches!(decode(&[]), Err(Error::CorruptPayload(_))));
        assert!(matches!(decode(&bytes[..bytes.len() - 6]), Err(Error::CorruptPayload(_))));

        let not_json = compression::compress(b"not a dataset", 6).unwrap();
        assert!(matches!(decode(&not_json), Err(Error::CorruptPayload(_))));

        let mut padded = bytes.clone();
        padded.extend_from_slice(b"GARBAGE-not-gzip");
        assert!(matches!(decode(&padded), Err(Error::CorruptPayload(_))));

        let not_utf8 = compression::compress(&[0xff, 0xfe, 0xfd], 6).unwrap();
        assert!(matches!(decode(&not_utf8), Err(Error::CorruptPayload(_))));
    }

    #[test]
    fn test_encode_rejects_invalid() {
        let mut ds = dataset(1, 4);
        ds.shapes[0].delta.tangents.pop();
        assert!(matches!(encode(&ds), Err(Error::InvalidDataset(_))));
    }
}

//! Mesh snapshots and blend shape reconstruction.

mod rebuild;
mod snapshot;

pub use rebuild::{rebuild, remove_blend_shape, MeshBuilder};
pub use snapshot::MeshSnapshot;

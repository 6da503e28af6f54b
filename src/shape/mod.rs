//! Blend shape data model.
//!
//! - [`DeltaSet`] - per-vertex vertex/normal/tangent offsets
//! - [`BlendShapeFrame`] / [`BlendShape`] - weighted frames as stored on a mesh
//! - [`BlendShapeDataset`] - the exported unit, tagged with its source mesh

mod dataset;
mod delta;
mod frame;

pub use dataset::{BlendShapeDataset, DatasetShape};
pub use delta::DeltaSet;
pub use frame::{is_valid_weight, BlendShape, BlendShapeFrame};

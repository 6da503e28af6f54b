//! # BlendMaestro
//!
//! Extract a subset of mesh blend shapes into a compressed, portable dataset
//! and re-apply it to a structurally matching mesh on another model.
//!
//! Engine meshes only allow appending blend shape frames. Replacing or
//! removing a shape is done by rebuilding the whole mesh: base geometry and
//! skin data are copied verbatim and every surviving frame is replayed in
//! its original order.
//!
//! ## Modules
//!
//! - [`util`] - Errors, math types, skin weights
//! - [`shape`] - Delta sets, frames, blend shapes, datasets
//! - [`codec`] - Gzip + JSON payload encoding
//! - [`mesh`] - Mesh snapshots and the rebuild algorithm
//! - [`transfer`] - Export selection, import merge, collision policy
//! - [`store`] - Mesh store collaborators, backups, asset files
//! - [`session`] - Read-merge-backup-write orchestration
//! - [`settings`] - Persistent configuration
//!
//! ## Example
//!
//! ```ignore
//! use blendmaestro::prelude::*;
//!
//! let dataset = export_selection(&source_mesh, &[1])?;
//! let payload = codec::encode(&dataset)?;
//!
//! let incoming = codec::decode(&payload)?;
//! let outcome = merge(&target_mesh, &target_mesh.name, &incoming, &mut Resolution::Overwrite)?;
//! ```

pub mod util;
pub mod shape;
pub mod codec;
pub mod mesh;
pub mod transfer;
pub mod store;
pub mod session;
pub mod settings;

// Re-export commonly used types
pub use util::{Error, Result};
pub use mesh::MeshSnapshot;
pub use shape::{BlendShapeDataset, DeltaSet};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::codec::{self, Codec};
    pub use crate::mesh::{rebuild, remove_blend_shape, MeshBuilder, MeshSnapshot};
    pub use crate::session::ImportSession;
    pub use crate::shape::*;
    pub use crate::store::{DirStore, MemoryStore, MeshStore};
    pub use crate::transfer::*;
    pub use crate::util::{BoneWeight, Error, Result, FULL_WEIGHT};
}

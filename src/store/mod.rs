//! Mesh storage collaborators and dataset asset files.
//!
//! The library never mutates a mesh in place. A [`MeshStore`] hands out
//! snapshots and accepts whole replacement snapshots.

pub mod asset;
pub mod backup;
mod dir;
mod memory;

pub use backup::ExistingBackup;
pub use dir::{DirStore, MESH_EXTENSION};
pub use memory::MemoryStore;

use crate::mesh::MeshSnapshot;
use crate::util::Result;

/// Access to live meshes.
///
/// Handles identify meshes within the store. Reads return a complete,
/// consistent snapshot; writes replace a mesh atomically.
pub trait MeshStore {
    /// Handles of all meshes in the store.
    fn list_meshes(&self) -> Result<Vec<String>>;

    fn read_mesh(&self, handle: &str) -> Result<MeshSnapshot>;

    fn write_mesh(&mut self, handle: &str, mesh: &MeshSnapshot) -> Result<()>;

    /// Preserve the current mesh before it is first overwritten.
    ///
    /// `Ok(false)` means no backup was made and the write must not proceed.
    fn backup_original(&mut self, handle: &str) -> Result<bool>;

    /// Handles of meshes carrying at least one blend shape.
    fn meshes_with_blend_shapes(&self) -> Result<Vec<String>> {
        let mut found = Vec::new();
        for handle in self.list_meshes()? {
            if self.read_mesh(&handle)?.has_blend_shapes() {
                found.push(handle);
            }
        }
        Ok(found)
    }
}

//! In-memory mesh store.

use std::collections::BTreeMap;

use super::MeshStore;
use crate::mesh::MeshSnapshot;
use crate::util::{Error, Result};

/// Meshes held in memory, keyed by handle. Backups keep the first copy.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    meshes: BTreeMap<String, MeshSnapshot>,
    backups: BTreeMap<String, MeshSnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh under its own name.
    pub fn insert(&mut self, mesh: MeshSnapshot) {
        self.meshes.insert(mesh.name.clone(), mesh);
    }

    pub fn get(&self, handle: &str) -> Option<&MeshSnapshot> {
        self.meshes.get(handle)
    }

    /// Backed-up original of a mesh.
    pub fn backup(&self, handle: &str) -> Option<&MeshSnapshot> {
        self.backups.get(handle)
    }
}

impl FromIterator<MeshSnapshot> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = MeshSnapshot>>(iter: I) -> Self {
        let mut store = Self::new();
        for mesh in iter {
            store.insert(mesh);
        }
        store
    }
}

impl MeshStore for MemoryStore {
    fn list_meshes(&self) -> Result<Vec<String>> {
        Ok(self.meshes.keys().cloned().collect())
    }

    fn read_mesh(&self, handle: &str) -> Result<MeshSnapshot> {
        self.meshes
            .get(handle)
            .cloned()
            .ok_or_else(|| Error::MeshNotFound(handle.to_string()))
    }

    fn write_mesh(&mut self, handle: &str, mesh: &MeshSnapshot) -> Result<()> {
        mesh.validate()?;
        let slot = self
            .meshes
            .get_mut(handle)
            .ok_or_else(|| Error::MeshNotFound(handle.to_string()))?;
        *slot = mesh.clone();
        Ok(())
    }

    fn backup_original(&mut self, handle: &str) -> Result<bool> {
        let mesh = self
            .meshes
            .get(handle)
            .ok_or_else(|| Error::MeshNotFound(handle.to_string()))?;
        self.backups.entry(handle.to_string()).or_insert_with(|| mesh.clone());
        Ok(true)
    }
}

//! Editing session over a mesh store.
//!
//! Each operation reads a fresh snapshot once, computes the new mesh, backs
//! up the original before the first destructive write to a mesh, then writes
//! the replacement once. Concurrent edits of the same mesh by other tools
//! between read and write are not detected.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::mesh::{remove_blend_shape, MeshSnapshot};
use crate::shape::BlendShapeDataset;
use crate::store::MeshStore;
use crate::transfer::{export_by_name, export_selection, merge, CollisionPolicy, MergeOutcome};
use crate::util::{Error, Result};

/// Import/export session bound to one store.
#[derive(Debug)]
pub struct ImportSession<S: MeshStore> {
    store: S,
    backup: bool,
    backed_up: HashSet<String>,
}

impl<S: MeshStore> ImportSession<S> {
    /// Session with backups enabled.
    pub fn new(store: S) -> Self {
        Self {
            store,
            backup: true,
            backed_up: HashSet::new(),
        }
    }

    /// Enable or disable backups before destructive writes.
    pub fn with_backup(mut self, enabled: bool) -> Self {
        self.backup = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Export shapes by engine index from a stored mesh.
    pub fn export(&self, handle: &str, indices: &[usize]) -> Result<BlendShapeDataset> {
        export_selection(&self.store.read_mesh(handle)?, indices)
    }

    /// Export shapes by name from a stored mesh.
    pub fn export_named<N: AsRef<str>>(&self, handle: &str, names: &[N]) -> Result<BlendShapeDataset> {
        export_by_name(&self.store.read_mesh(handle)?, names)
    }

    /// Merge a dataset into one mesh. The mesh name is the identity tag.
    pub fn import<P: CollisionPolicy + ?Sized>(
        &mut self,
        handle: &str,
        dataset: &BlendShapeDataset,
        policy: &mut P,
    ) -> Result<MergeOutcome> {
        let snapshot = self.store.read_mesh(handle)?;
        self.apply(handle, &snapshot, dataset, policy)
    }

    /// Merge a dataset into every mesh in the store whose name matches the
    /// dataset's mesh name.
    pub fn import_matching<P: CollisionPolicy + ?Sized>(
        &mut self,
        dataset: &BlendShapeDataset,
        policy: &mut P,
    ) -> Result<Vec<(String, MergeOutcome)>> {
        let mut matched = Vec::new();
        for handle in self.store.list_meshes()? {
            let snapshot = self.store.read_mesh(&handle)?;
            if snapshot.name == dataset.mesh_name {
                matched.push((handle, snapshot));
            }
        }
        if matched.is_empty() {
            return Err(Error::MeshNotFound(dataset.mesh_name.clone()));
        }

        let mut outcomes = Vec::with_capacity(matched.len());
        for (handle, snapshot) in matched {
            let outcome = self.apply(&handle, &snapshot, dataset, policy)?;
            outcomes.push((handle, outcome));
        }
        Ok(outcomes)
    }

    /// Remove a blend shape that must exist on the stored mesh.
    pub fn remove_shape(&mut self, handle: &str, name: &str) -> Result<MeshSnapshot> {
        let snapshot = self.store.read_mesh(handle)?;
        let rebuilt = remove_blend_shape(&snapshot, name)?;
        self.commit(handle, &rebuilt)?;
        Ok(rebuilt)
    }

    fn apply<P: CollisionPolicy + ?Sized>(
        &mut self,
        handle: &str,
        snapshot: &MeshSnapshot,
        dataset: &BlendShapeDataset,
        policy: &mut P,
    ) -> Result<MergeOutcome> {
        let outcome = merge(snapshot, &snapshot.name, dataset, policy)?;
        if outcome.is_unchanged() {
            tracing::info!(mesh = handle, "nothing to import");
        } else {
            self.commit(handle, &outcome.mesh)?;
        }
        Ok(outcome)
    }

    fn commit(&mut self, handle: &str, mesh: &MeshSnapshot) -> Result<()> {
        self.ensure_backup(handle)?;
        self.store.write_mesh(handle, mesh)
    }

    fn ensure_backup(&mut self, handle: &str) -> Result<()> {
        if !self.backup || self.backed_up.contains(handle) {
            return Ok(());
        }
        if !self.store.backup_original(handle)? {
            return Err(Error::BackupFailed {
                path: PathBuf::from(handle),
                reason: "existing backup may not be replaced".into(),
            });
        }
        self.backed_up.insert(handle.to_string());
        Ok(())
    }
}

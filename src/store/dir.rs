//! Directory-backed mesh store: one JSON snapshot file per mesh.

use std::collections::HashSet;
use std::fs;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::backup::{backup_file, backup_path, ExistingBackup, DEFAULT_SUFFIX};
use super::MeshStore;
use crate::mesh::MeshSnapshot;
use crate::util::{Error, Result};

/// Snapshot file extension.
pub const MESH_EXTENSION: &str = ".mesh.json";

/// Meshes stored as `<handle>.mesh.json` files in a directory.
///
/// Writes go to a temporary file that is renamed over the target, so readers
/// never see a half-written mesh.
#[derive(Clone, Debug)]
pub struct DirStore {
    root: PathBuf,
    backup_suffix: String,
    existing_backup: ExistingBackup,
}

impl DirStore {
    /// Open a store rooted at an existing directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("not a directory: {}", root.display()),
            )));
        }
        Ok(Self {
            root,
            backup_suffix: DEFAULT_SUFFIX.to_string(),
            existing_backup: ExistingBackup::default(),
        })
    }

    /// Configure backup naming and the treatment of earlier backups.
    pub fn with_backup(mut self, suffix: impl Into<String>, existing: ExistingBackup) -> Self {
        self.backup_suffix = suffix.into();
        self.existing_backup = existing;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path of a mesh handle.
    pub fn path_for(&self, handle: &str) -> Result<PathBuf> {
        if handle.is_empty() || handle.contains(['/', '\\']) || handle.starts_with('.') {
            return Err(Error::MeshNotFound(handle.to_string()));
        }
        Ok(self.root.join(format!("{handle}{MESH_EXTENSION}")))
    }

    /// Backup file of a mesh handle: `<handle><suffix>.mesh.json`.
    pub fn backup_path_for(&self, handle: &str) -> Result<PathBuf> {
        Ok(backup_path(&self.path_for(handle)?, &self.backup_suffix, MESH_EXTENSION))
    }

    /// Handle of the mesh that `handle` is the backup of, if that mesh is present.
    fn backup_owner<'a>(&self, handle: &'a str, handles: &HashSet<String>) -> Option<&'a str> {
        if self.backup_suffix.is_empty() {
            return None;
        }
        handle
            .strip_suffix(self.backup_suffix.as_str())
            .filter(|owner| handles.contains(*owner))
    }
}

impl MeshStore for DirStore {
    fn list_meshes(&self) -> Result<Vec<String>> {
        let mut found = HashSet::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let Some(handle) = name.strip_suffix(MESH_EXTENSION) else { continue };
            if handle.is_empty() || handle.starts_with('.') {
                continue;
            }
            found.insert(handle.to_string());
        }

        // Backups only exist next to the mesh they were taken from
        let mut handles: Vec<String> = found
            .iter()
            .filter(|h| self.backup_owner(h, &found).is_none())
            .cloned()
            .collect();
        handles.sort();
        Ok(handles)
    }

    fn read_mesh(&self, handle: &str) -> Result<MeshSnapshot> {
        let path = self.path_for(handle)?;
        let file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::MeshNotFound(handle.to_string())),
            Err(e) => return Err(e.into()),
        };
        let mesh: MeshSnapshot = serde_json::from_reader(BufReader::new(file))?;
        mesh.validate()?;
        tracing::debug!(
            mesh = handle,
            vertices = mesh.vertex_count(),
            shapes = mesh.blend_shape_count(),
            "read mesh"
        );
        Ok(mesh)
    }

    fn write_mesh(&mut self, handle: &str, mesh: &MeshSnapshot) -> Result<()> {
        mesh.validate()?;
        let path = self.path_for(handle)?;
        let tmp = self.root.join(format!(".{handle}{MESH_EXTENSION}.tmp"));

        let result = (|| -> Result<()> {
            let mut writer = BufWriter::new(fs::File::create(&tmp)?);
            serde_json::to_writer(&mut writer, mesh)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
            Ok(())
        })();
        if let Err(e) = result {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        fs::rename(&tmp, &path)?;
        tracing::info!(mesh = handle, shapes = mesh.blend_shape_count(), "wrote mesh");
        Ok(())
    }

    fn backup_original(&mut self, handle: &str) -> Result<bool> {
        let path = self.path_for(handle)?;
        let target = self.backup_path_for(handle)?;
        backup_file(&path, &target, self.existing_backup)
    }
}

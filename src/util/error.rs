//! Error types for the BlendMaestro library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for blend shape operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Payload is not a valid compressed dataset
    #[error("Corrupt payload: {0}")]
    CorruptPayload(String),

    /// Delta arrays do not match the mesh vertex count
    #[error("Vertex count mismatch for shape '{shape}': expected {expected}, got {actual}")]
    VertexCountMismatch {
        shape: String,
        expected: usize,
        actual: usize,
    },

    /// Dataset belongs to a different mesh
    #[error("Mesh identity mismatch: dataset targets '{dataset}', mesh is '{target}'")]
    MeshIdentityMismatch { dataset: String, target: String },

    /// Nothing was selected for export
    #[error("No blend shapes selected")]
    EmptySelection,

    /// Blend shape expected on the mesh is missing
    #[error("Blend shape not found: {0}")]
    ShapeNotFound(String),

    /// Selected shape index out of bounds
    #[error("Blend shape index {index} out of bounds (count: {count})")]
    ShapeIndexOutOfBounds { index: usize, count: usize },

    /// Shape name already present on the mesh being built
    #[error("Blend shape already exists: {0}")]
    DuplicateShape(String),

    /// Frame weight outside (0, 100] or not ascending
    #[error("Invalid frame weight {weight} for shape '{shape}'")]
    InvalidWeight { shape: String, weight: f32 },

    /// Snapshot arrays are inconsistent
    #[error("Invalid mesh snapshot: {0}")]
    InvalidSnapshot(String),

    /// Dataset cannot be encoded
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// Mesh handle unknown to the store
    #[error("Mesh not found: {0}")]
    MeshNotFound(String),

    /// Backup of the original could not be made
    #[error("Backup failed for {path}: {reason}")]
    BackupFailed { path: PathBuf, reason: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a corrupt payload error.
    pub fn corrupt(msg: impl Into<String>) -> Self {
        Self::CorruptPayload(msg.into())
    }

    /// Create an invalid snapshot error.
    pub fn invalid_snapshot(msg: impl Into<String>) -> Self {
        Self::InvalidSnapshot(msg.into())
    }

    /// Create an invalid dataset error.
    pub fn invalid_dataset(msg: impl Into<String>) -> Self {
        Self::InvalidDataset(msg.into())
    }
}

/// Result type alias for BlendMaestro operations.
pub type Result<T> = std::result::Result<T, Error>;

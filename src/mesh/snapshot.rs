//! Immutable capture of a skinned mesh: base geometry, skin data and the
//! blend shape frame table.

use serde::{Deserialize, Serialize};

use crate::shape::BlendShape;
use crate::util::{BoneWeight, Error, Mat4, Result, Vec2, Vec3, Vec4};

/// Snapshot of a mesh's full state at one instant.
///
/// Blend shape order is significant: engine blend shape indices are
/// positional, so every rebuild keeps the surviving shapes in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSnapshot {
    /// Mesh name, used as the identity tag for imports.
    pub name: String,
    /// Vertex positions.
    pub vertices: Vec<Vec3>,
    /// Vertex normals (empty or one per vertex).
    pub normals: Vec<Vec3>,
    /// Vertex tangents with handedness in `w` (empty or one per vertex).
    pub tangents: Vec<Vec4>,
    /// Primary UV channel (empty or one per vertex).
    pub uvs: Vec<Vec2>,
    /// Triangle index buffer.
    pub triangles: Vec<u32>,
    /// Skin weights (empty or one per vertex).
    pub bone_weights: Vec<BoneWeight>,
    /// Inverse bind matrices, one per bone.
    pub bind_poses: Vec<Mat4>,
    /// Blend shapes in engine index order.
    pub blend_shapes: Vec<BlendShape>,
}

impl MeshSnapshot {
    /// Create an empty snapshot.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Get number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn blend_shape_count(&self) -> usize {
        self.blend_shapes.len()
    }

    pub fn has_blend_shapes(&self) -> bool {
        !self.blend_shapes.is_empty()
    }

    /// Engine index of a blend shape.
    pub fn blend_shape_index(&self, name: &str) -> Option<usize> {
        self.blend_shapes.iter().position(|s| s.name == name)
    }

    pub fn blend_shape(&self, name: &str) -> Option<&BlendShape> {
        self.blend_shapes.iter().find(|s| s.name == name)
    }

    pub fn blend_shape_names(&self) -> impl Iterator<Item = &str> {
        self.blend_shapes.iter().map(|s| s.name.as_str())
    }

    /// Compare everything except the blend shape table.
    pub fn same_base(&self, other: &Self) -> bool {
        self.name == other.name
            && self.vertices == other.vertices
            && self.normals == other.normals
            && self.tangents == other.tangents
            && self.uvs == other.uvs
            && self.triangles == other.triangles
            && self.bone_weights == other.bone_weights
            && self.bind_poses == other.bind_poses
    }

    /// Check internal consistency of a snapshot read from a collaborator.
    pub fn validate(&self) -> Result<()> {
        let count = self.vertex_count();

        let parallel = [
            ("normals", self.normals.len()),
            ("tangents", self.tangents.len()),
            ("uvs", self.uvs.len()),
            ("bone_weights", self.bone_weights.len()),
        ];
        for (field, len) in parallel {
            if len != 0 && len != count {
                return Err(Error::invalid_snapshot(format!(
                    "{field} has {len} entries, mesh has {count} vertices"
                )));
            }
        }

        if self.triangles.len() % 3 != 0 {
            return Err(Error::invalid_snapshot(format!(
                "index buffer length {} is not a multiple of 3",
                self.triangles.len()
            )));
        }
        if let Some(&bad) = self.triangles.iter().find(|&&i| i as usize >= count) {
            return Err(Error::invalid_snapshot(format!(
                "triangle index {bad} out of range ({count} vertices)"
            )));
        }

        for (i, shape) in self.blend_shapes.iter().enumerate() {
            if self.blend_shapes[..i].iter().any(|s| s.name == shape.name) {
                return Err(Error::DuplicateShape(shape.name.clone()));
            }
            if !shape.has_valid_weights() {
                return Err(Error::invalid_snapshot(format!(
                    "blend shape '{}' has no frames or unordered weights",
                    shape.name
                )));
            }
            for frame in &shape.frames {
                frame.delta.check_len(&shape.name, count)?;
            }
        }

        Ok(())
    }
}

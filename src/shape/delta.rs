//! Per-vertex delta arrays of a single blend shape frame.

use serde::{Deserialize, Serialize};

use crate::util::{Error, Result, Vec3};

/// Vertex, normal and tangent offsets applied at full frame weight.
///
/// All three arrays are parallel and hold one entry per mesh vertex.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaSet {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec3>,
}

impl DeltaSet {
    /// Create a delta set from its three arrays.
    pub fn new(vertices: Vec<Vec3>, normals: Vec<Vec3>, tangents: Vec<Vec3>) -> Self {
        Self { vertices, normals, tangents }
    }

    /// All-zero deltas for `count` vertices.
    pub fn zeroed(count: usize) -> Self {
        Self {
            vertices: vec![Vec3::ZERO; count],
            normals: vec![Vec3::ZERO; count],
            tangents: vec![Vec3::ZERO; count],
        }
    }

    /// Number of vertices covered (length of the vertex delta array).
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Check that the three arrays have the same length.
    pub fn is_consistent(&self) -> bool {
        self.normals.len() == self.vertices.len() && self.tangents.len() == self.vertices.len()
    }

    /// Check that every component is finite.
    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .chain(&self.normals)
            .chain(&self.tangents)
            .all(|v| v.is_finite())
    }

    /// Verify that all three arrays cover exactly `expected` vertices.
    ///
    /// Reports the first array whose length differs.
    pub fn check_len(&self, shape: &str, expected: usize) -> Result<()> {
        for actual in [self.vertices.len(), self.normals.len(), self.tangents.len()] {
            if actual != expected {
                return Err(Error::VertexCountMismatch {
                    shape: shape.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Number of vertices whose position delta exceeds `epsilon`.
    pub fn affected_vertices(&self, epsilon: f32) -> usize {
        self.vertices.iter().filter(|d| d.length() > epsilon).count()
    }

    /// Largest position offset.
    pub fn max_displacement(&self) -> f32 {
        self.vertices.iter().map(|d| d.length()).fold(0.0, f32::max)
    }
}

//! The exported unit: a set of named blend shapes tagged with the mesh
//! they were captured from.

use super::frame::is_valid_weight;
use super::{BlendShapeFrame, DeltaSet};
use crate::util::FULL_WEIGHT;

/// A single shape inside a dataset. Applied as a one-frame blend shape.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetShape {
    pub name: String,
    /// Weight of the appended frame, [`FULL_WEIGHT`] for every exported shape.
    pub weight: f32,
    pub delta: DeltaSet,
}

impl DatasetShape {
    /// Shape applied at full weight.
    pub fn new(name: impl Into<String>, delta: DeltaSet) -> Self {
        Self {
            name: name.into(),
            weight: FULL_WEIGHT,
            delta,
        }
    }

    /// Shape applied at a custom frame weight.
    pub fn with_weight(name: impl Into<String>, weight: f32, delta: DeltaSet) -> Self {
        Self {
            name: name.into(),
            weight,
            delta,
        }
    }

    /// The frame this shape becomes when applied to a mesh.
    pub fn to_frame(&self) -> BlendShapeFrame {
        BlendShapeFrame::new(self.weight, self.delta.clone())
    }
}

/// Ordered blend shapes plus the name of the mesh they belong to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlendShapeDataset {
    /// Identity tag compared against the target mesh before merging.
    pub mesh_name: String,
    pub shapes: Vec<DatasetShape>,
}

impl BlendShapeDataset {
    pub fn new(mesh_name: impl Into<String>) -> Self {
        Self {
            mesh_name: mesh_name.into(),
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: DatasetShape) {
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Find a shape by name.
    pub fn shape(&self, name: &str) -> Option<&DatasetShape> {
        self.shapes.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|s| s.name.as_str())
    }

    /// Check structural integrity: parallel delta arrays, finite values and
    /// weights in (0, 100]. Returns a description of the first problem.
    pub fn check(&self) -> std::result::Result<(), String> {
        for shape in &self.shapes {
            let d = &shape.delta;
            if !d.is_consistent() {
                return Err(format!(
                    "shape '{}' has mismatched delta arrays (vertices {}, normals {}, tangents {})",
                    shape.name,
                    d.vertices.len(),
                    d.normals.len(),
                    d.tangents.len()
                ));
            }
            if !is_valid_weight(shape.weight) {
                return Err(format!("shape '{}' has invalid weight {}", shape.name, shape.weight));
            }
            if !d.is_finite() {
                return Err(format!("shape '{}' contains non-finite deltas", shape.name));
            }
        }
        Ok(())
    }
}

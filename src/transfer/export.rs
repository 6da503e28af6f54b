//! Extracting selected blend shapes from a mesh into a dataset.

use crate::mesh::MeshSnapshot;
use crate::shape::{BlendShapeDataset, DatasetShape};
use crate::util::{Error, Result};

/// Build a dataset from the shapes at `indices` (engine blend shape indices).
///
/// Shapes keep the selection order; repeated indices are taken once. Each
/// shape contributes its first frame only, exported at full weight, so
/// progressive shapes lose their intermediate frames.
pub fn export_selection(snapshot: &MeshSnapshot, indices: &[usize]) -> Result<BlendShapeDataset> {
    if indices.is_empty() {
        return Err(Error::EmptySelection);
    }

    let count = snapshot.blend_shape_count();
    let mut dataset = BlendShapeDataset::new(snapshot.name.clone());
    let mut taken = Vec::with_capacity(indices.len());

    for &index in indices {
        let shape = snapshot
            .blend_shapes
            .get(index)
            .ok_or(Error::ShapeIndexOutOfBounds { index, count })?;
        if taken.contains(&index) {
            continue;
        }
        taken.push(index);

        let frame = shape
            .first_frame()
            .ok_or_else(|| Error::invalid_snapshot(format!("blend shape '{}' has no frames", shape.name)))?;
        if shape.is_progressive() {
            tracing::warn!(
                shape = %shape.name,
                frames = shape.frame_count(),
                "progressive blend shape flattened to its first frame"
            );
        }
        dataset.push(DatasetShape::new(shape.name.clone(), frame.delta.clone()));
    }

    tracing::info!(mesh = %dataset.mesh_name, shapes = dataset.len(), "exported blend shapes");
    Ok(dataset)
}

/// Like [`export_selection`], selecting shapes by name.
pub fn export_by_name<S: AsRef<str>>(snapshot: &MeshSnapshot, names: &[S]) -> Result<BlendShapeDataset> {
    let indices = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            snapshot
                .blend_shape_index(name)
                .ok_or_else(|| Error::ShapeNotFound(name.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;
    export_selection(snapshot, &indices)
}

//! Blend shape removal and replacement by full mesh reconstruction.
//!
//! Engine meshes only support appending blend shape frames. Removing or
//! overwriting a shape therefore means building a fresh mesh: copy the base
//! geometry and skin data, replay every surviving frame in its original
//! order, then append the new shapes.

use std::collections::HashSet;

use super::MeshSnapshot;
use crate::shape::{is_valid_weight, BlendShape, BlendShapeFrame, DatasetShape, DeltaSet};
use crate::util::{Error, Result};

/// Append-only mesh construction, mirroring the engine's frame API.
///
/// A frame added under the name of the most recent shape extends that shape
/// and must have a greater weight than its last frame. Any other reuse of an
/// existing name is rejected.
#[derive(Debug)]
pub struct MeshBuilder {
    mesh: MeshSnapshot,
}

impl MeshBuilder {
    /// Start from the base geometry and skin data of `source`, without blend shapes.
    pub fn from_base(source: &MeshSnapshot) -> Self {
        Self {
            mesh: MeshSnapshot {
                name: source.name.clone(),
                vertices: source.vertices.clone(),
                normals: source.normals.clone(),
                tangents: source.tangents.clone(),
                uvs: source.uvs.clone(),
                triangles: source.triangles.clone(),
                bone_weights: source.bone_weights.clone(),
                bind_poses: source.bind_poses.clone(),
                blend_shapes: Vec::new(),
            },
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.mesh.blend_shape_index(name).is_some()
    }

    /// Append one frame.
    pub fn add_blend_shape_frame(&mut self, name: &str, weight: f32, delta: DeltaSet) -> Result<()> {
        delta.check_len(name, self.vertex_count())?;
        if !is_valid_weight(weight) {
            return Err(Error::InvalidWeight {
                shape: name.to_string(),
                weight,
            });
        }

        let last = self.mesh.blend_shapes.len().checked_sub(1);
        match self.mesh.blend_shape_index(name) {
            None => {
                self.mesh.blend_shapes.push(BlendShape::single(name, weight, delta));
            }
            Some(index) if Some(index) == last => {
                let shape = &mut self.mesh.blend_shapes[index];
                let previous = shape.frames.last().map_or(0.0, |f| f.weight);
                if weight <= previous {
                    return Err(Error::InvalidWeight {
                        shape: name.to_string(),
                        weight,
                    });
                }
                shape.frames.push(BlendShapeFrame::new(weight, delta));
            }
            Some(_) => return Err(Error::DuplicateShape(name.to_string())),
        }
        Ok(())
    }

    pub fn finish(self) -> MeshSnapshot {
        self.mesh
    }
}

/// Rebuild `source` without the shapes named in `exclude`, then append `append`.
///
/// Output shape order is the surviving shapes in original order followed by
/// the appended shapes in the order given. Excluded names missing from the
/// source are ignored. Appending a name that survived is a
/// [`Error::DuplicateShape`]; exclude it first to overwrite.
///
/// A surviving shape without frames is an [`Error::InvalidSnapshot`], since
/// dropping it would shift the index of every later shape.
///
/// `source` is never modified; on error no snapshot is produced.
#[tracing::instrument(skip_all, fields(mesh = %source.name, exclude = exclude.len(), append = append.len()))]
pub fn rebuild<S: AsRef<str>>(
    source: &MeshSnapshot,
    exclude: &[S],
    append: &[DatasetShape],
) -> Result<MeshSnapshot> {
    let count = source.vertex_count();
    for shape in append {
        shape.delta.check_len(&shape.name, count)?;
    }

    let excluded: HashSet<&str> = exclude.iter().map(|s| s.as_ref()).collect();
    let mut builder = MeshBuilder::from_base(source);

    for shape in &source.blend_shapes {
        if excluded.contains(shape.name.as_str()) {
            tracing::debug!(shape = %shape.name, frames = shape.frame_count(), "dropping blend shape");
            continue;
        }
        if shape.frames.is_empty() {
            return Err(Error::invalid_snapshot(format!("blend shape '{}' has no frames", shape.name)));
        }
        for frame in &shape.frames {
            builder.add_blend_shape_frame(&shape.name, frame.weight, frame.delta.clone())?;
        }
    }

    for shape in append {
        if builder.contains(&shape.name) {
            return Err(Error::DuplicateShape(shape.name.clone()));
        }
        tracing::debug!(shape = %shape.name, weight = shape.weight, "appending blend shape");
        builder.add_blend_shape_frame(&shape.name, shape.weight, shape.delta.clone())?;
    }

    Ok(builder.finish())
}

/// Remove a single blend shape that is expected to be present.
///
/// Unlike [`rebuild`], a missing name is an error: it means the caller is
/// working from a stale snapshot.
pub fn remove_blend_shape(source: &MeshSnapshot, name: &str) -> Result<MeshSnapshot> {
    if source.blend_shape_index(name).is_none() {
        return Err(Error::ShapeNotFound(name.to_string()));
    }
    rebuild(source, &[name], &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{BoneWeight, Mat4, Vec2, Vec3, Vec4};

    const N: usize = 4;

    fn delta(seed: f32) -> DeltaSet {
        DeltaSet::new(
            (0..N).map(|i| Vec3::splat(seed + i as f32)).collect(),
            (0..N).map(|i| Vec3::new(seed, i as f32, 0.0)).collect(),
            (0..N).map(|i| Vec3::new(0.0, seed, i as f32)).collect(),
        )
    }

    fn mesh(shapes: &[&str]) -> MeshSnapshot {
        MeshSnapshot {
            name: "Body".into(),
            vertices: (0..N).map(|i| Vec3::new(i as f32, 0.5, -1.0)).collect(),
            normals: vec![Vec3::Y; N],
            tangents: vec![Vec4::new(1.0, 0.0, 0.0, -1.0); N],
            uvs: (0..N).map(|i| Vec2::new(i as f32 * 0.25, 0.0)).collect(),
            triangles: vec![0, 1, 2, 0, 2, 3],
            bone_weights: (0..N as u32).map(BoneWeight::single).collect(),
            bind_poses: vec![Mat4::IDENTITY, Mat4::from_translation(Vec3::X)],
            blend_shapes: shapes
                .iter()
                .enumerate()
                .map(|(i, name)| BlendShape::single(*name, 100.0, delta(i as f32 * 10.0)))
                .collect(),
        }
    }

    fn names(mesh: &MeshSnapshot) -> Vec<&str> {
        mesh.blend_shape_names().collect()
    }

    const NONE: &[&str] = &[];

    #[test]
    fn test_identity() {
        let source = mesh(&["A", "B", "C"]);
        let out = rebuild(&source, NONE, &[]).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_exclude_absent_is_noop() {
        let source = mesh(&["A", "B"]);
        let out = rebuild(&source, &["X"], &[]).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn test_order_preserved() {
        let source = mesh(&["A", "B", "C"]);
        let out = rebuild(&source, &["B"], &[]).unwrap();
        assert_eq!(names(&out), ["A", "C"]);
        assert_eq!(out.blend_shapes[0], source.blend_shapes[0]);
        assert_eq!(out.blend_shapes[1], source.blend_shapes[2]);
        assert!(out.same_base(&source));
    }

    #[test]
    fn test_multi_frame_shapes_replayed() {
        let mut source = mesh(&["A", "B"]);
        source.blend_shapes[0].frames.insert(0, BlendShapeFrame::new(25.0, delta(3.0)));
        source.blend_shapes[0].frames.insert(1, BlendShapeFrame::new(60.0, delta(4.0)));

        let out = rebuild(&source, &["B"], &[]).unwrap();
        assert_eq!(out.blend_shapes.len(), 1);
        assert_eq!(out.blend_shapes[0], source.blend_shapes[0]);
        let weights: Vec<f32> = out.blend_shapes[0].frames.iter().map(|f| f.weight).collect();
        assert_eq!(weights, [25.0, 60.0, 100.0]);
    }

    #[test]
    fn test_exclude_and_append() {
        let source = mesh(&["A", "B", "C"]);
        let replacement = DatasetShape::new("B", delta(99.0));
        let extra = DatasetShape::with_weight("D", 50.0, delta(7.0));

        let out = rebuild(&source, &["B"], &[replacement.clone(), extra]).unwrap();
        assert_eq!(names(&out), ["A", "C", "B", "D"]);
        assert_eq!(out.blend_shapes[2].frames, vec![replacement.to_frame()]);
        assert_eq!(out.blend_shapes[3].frames[0].weight, 50.0);
        assert!(out.same_base(&source));
    }

    #[test]
    fn test_append_vertex_count_mismatch() {
        let source = mesh(&["A"]);
        let bad = DatasetShape::new("B", DeltaSet::zeroed(N + 1));
        let err = rebuild(&source, NONE, &[bad]).unwrap_err();
        assert!(matches!(err, Error::VertexCountMismatch { expected: N, actual, .. } if actual == N + 1));
    }

    #[test]
    fn test_append_surviving_name_rejected() {
        let source = mesh(&["A", "B"]);
        let err = rebuild(&source, NONE, &[DatasetShape::new("B", delta(1.0))]).unwrap_err();
        assert!(matches!(err, Error::DuplicateShape(name) if name == "B"));
    }

    #[test]
    fn test_append_invalid_weight() {
        let source = mesh(&[]);
        let err = rebuild(&source, NONE, &[DatasetShape::with_weight("A", 0.0, delta(1.0))]).unwrap_err();
        assert!(matches!(err, Error::InvalidWeight { .. }));
    }

    #[test]
    fn test_frameless_shape_rejected() {
        let mut source = mesh(&["A", "B", "C"]);
        source.blend_shapes[1].frames.clear();

        let err = rebuild(&source, NONE, &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidSnapshot(msg) if msg.contains("'B'")));

        // Excluding it is fine
        let out = rebuild(&source, &["B"], &[]).unwrap();
        assert_eq!(names(&out), ["A", "C"]);
    }

    #[test]
    fn test_remove_blend_shape() {
        let source = mesh(&["A", "B"]);
        let out = remove_blend_shape(&source, "A").unwrap();
        assert_eq!(names(&out), ["B"]);

        let err = remove_blend_shape(&source, "Z").unwrap_err();
        assert!(matches!(err, Error::ShapeNotFound(name) if name == "Z"));
    }

    #[test]
    fn test_builder_frame_rules() {
        let base = mesh(&[]);
        let mut b = MeshBuilder::from_base(&base);
        b.add_blend_shape_frame("A", 50.0, delta(0.0)).unwrap();
        b.add_blend_shape_frame("A", 100.0, delta(1.0)).unwrap();
        assert!(matches!(
            b.add_blend_shape_frame("A", 80.0, delta(2.0)),
            Err(Error::InvalidWeight { .. })
        ));
        b.add_blend_shape_frame("B", 100.0, delta(3.0)).unwrap();
        assert!(matches!(
            b.add_blend_shape_frame("A", 100.0, delta(4.0)),
            Err(Error::DuplicateShape(_))
        ));

        let out = b.finish();
        assert_eq!(out.blend_shapes[0].frame_count(), 2);
        assert_eq!(out.blend_shapes[1].frame_count(), 1);
        assert!(out.validate().is_ok());
    }
}

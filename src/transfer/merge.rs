//! Applying an imported dataset to a target mesh.

use std::slice;

use super::policy::{CollisionPolicy, Resolution};
use crate::mesh::{rebuild, MeshSnapshot};
use crate::shape::BlendShapeDataset;
use crate::util::{Error, Result};

const NO_EXCLUDE: &[&str] = &[];

/// Result of a merge: the new mesh and what happened to each incoming shape.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeOutcome {
    pub mesh: MeshSnapshot,
    /// Shapes appended without a collision.
    pub added: Vec<String>,
    /// Shapes that replaced an existing shape of the same name.
    pub overwritten: Vec<String>,
    /// Colliding shapes left untouched.
    pub skipped: Vec<String>,
}

impl MergeOutcome {
    /// True when the mesh is identical to the target.
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.overwritten.is_empty()
    }

    pub fn into_mesh(self) -> MeshSnapshot {
        self.mesh
    }
}

/// Merge `incoming` into `target`.
///
/// `identity` is the tag the caller assigns to `target` (usually its mesh
/// name); a dataset captured from another mesh is rejected before any shape
/// is processed. Shapes are applied one at a time, so a later collision sees
/// the result of earlier ones. An overwritten shape moves to the end of the
/// blend shape list.
#[tracing::instrument(skip_all, fields(mesh = %identity, shapes = incoming.len()))]
pub fn merge<P: CollisionPolicy + ?Sized>(
    target: &MeshSnapshot,
    identity: &str,
    incoming: &BlendShapeDataset,
    policy: &mut P,
) -> Result<MergeOutcome> {
    if incoming.mesh_name != identity {
        return Err(Error::MeshIdentityMismatch {
            dataset: incoming.mesh_name.clone(),
            target: identity.to_string(),
        });
    }

    let mut updated: Option<MeshSnapshot> = None;
    let mut added = Vec::new();
    let mut overwritten = Vec::new();
    let mut skipped = Vec::new();

    for shape in &incoming.shapes {
        let current = updated.as_ref().unwrap_or(target);

        let next = if current.blend_shape_index(&shape.name).is_none() {
            added.push(shape.name.clone());
            rebuild(current, NO_EXCLUDE, slice::from_ref(shape))?
        } else {
            match policy.resolve(&shape.name) {
                Resolution::Skip => {
                    tracing::warn!(shape = %shape.name, "blend shape exists, skipping");
                    skipped.push(shape.name.clone());
                    continue;
                }
                Resolution::Overwrite => {
                    tracing::debug!(shape = %shape.name, "overwriting blend shape");
                    overwritten.push(shape.name.clone());
                    rebuild(current, &[shape.name.as_str()], slice::from_ref(shape))?
                }
            }
        };
        updated = Some(next);
    }

    tracing::info!(
        added = added.len(),
        overwritten = overwritten.len(),
        skipped = skipped.len(),
        "merged blend shapes"
    );

    Ok(MergeOutcome {
        mesh: updated.unwrap_or_else(|| target.clone()),
        added,
        overwritten,
        skipped,
    })
}

//! Math type re-exports and skinning primitives.
//!
//! Vectors and matrices come from `glam`; [`BoneWeight`] mirrors the
//! engine's four-influence skin weight.

pub use glam::{Mat4, Vec2, Vec3, Vec4};

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Full blend shape weight. Exported shapes are always applied at this weight.
pub const FULL_WEIGHT: f32 = 100.0;

/// Per-vertex skin binding with up to four bone influences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct BoneWeight {
    pub indices: [u32; 4],
    pub weights: [f32; 4],
}

impl BoneWeight {
    /// Binding fully to a single bone.
    #[inline]
    pub const fn single(bone: u32) -> Self {
        Self {
            indices: [bone, 0, 0, 0],
            weights: [1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Sum of all influence weights.
    #[inline]
    pub fn total(&self) -> f32 {
        self.weights.iter().sum()
    }
}

/// Reinterpret a vector slice as a flat float slice (`x, y, z, x, y, z, ...`).
#[inline]
pub fn flatten_vec3(v: &[Vec3]) -> &[f32] {
    bytemuck::cast_slice(v)
}

/// Rebuild vectors from a flat float list. Returns `None` when the length
/// is not a multiple of three.
pub fn unflatten_vec3(floats: &[f32]) -> Option<Vec<Vec3>> {
    if floats.len() % 3 != 0 {
        return None;
    }
    Some(floats.chunks_exact(3).map(Vec3::from_slice).collect())
}

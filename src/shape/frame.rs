//! Named blend shapes and their weighted frames as stored on a mesh.

use serde::{Deserialize, Serialize};

use super::DeltaSet;
use crate::util::FULL_WEIGHT;

/// One weight/delta pair of a blend shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendShapeFrame {
    /// Frame weight in (0, 100].
    pub weight: f32,
    pub delta: DeltaSet,
}

impl BlendShapeFrame {
    pub fn new(weight: f32, delta: DeltaSet) -> Self {
        Self { weight, delta }
    }

    /// Frame at full weight.
    pub fn full(delta: DeltaSet) -> Self {
        Self::new(FULL_WEIGHT, delta)
    }
}

/// Check that a frame weight lies in (0, 100].
#[inline]
pub fn is_valid_weight(weight: f32) -> bool {
    weight > 0.0 && weight <= FULL_WEIGHT
}

/// A named blend shape with frames in ascending weight order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlendShape {
    pub name: String,
    pub frames: Vec<BlendShapeFrame>,
}

impl BlendShape {
    /// Create a shape without frames.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frames: Vec::new(),
        }
    }

    /// Create a single-frame shape.
    pub fn single(name: impl Into<String>, weight: f32, delta: DeltaSet) -> Self {
        Self {
            name: name.into(),
            frames: vec![BlendShapeFrame::new(weight, delta)],
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// First (lowest weight) frame.
    pub fn first_frame(&self) -> Option<&BlendShapeFrame> {
        self.frames.first()
    }

    /// Progressive shapes carry more than one frame.
    pub fn is_progressive(&self) -> bool {
        self.frames.len() > 1
    }

    /// Frames are non-empty with strictly ascending weights in (0, 100].
    pub fn has_valid_weights(&self) -> bool {
        !self.frames.is_empty()
            && self.frames.iter().all(|f| is_valid_weight(f.weight))
            && self.frames.windows(2).all(|w| w[0].weight < w[1].weight)
    }
}

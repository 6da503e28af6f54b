//! Utility types and functions for BlendMaestro.
//!
//! - [`Error`] / [`Result`] - Error handling
//! - Math type re-exports from glam and [`BoneWeight`]

mod error;
mod math;

pub use error::*;
pub use math::*;

//! Moving blend shapes between meshes: export selection, import merge and
//! the collision policy that drives it.

mod export;
mod merge;
mod policy;

pub use export::{export_by_name, export_selection};
pub use merge::{merge, MergeOutcome};
pub use policy::{CollisionPolicy, PerShape, Resolution};

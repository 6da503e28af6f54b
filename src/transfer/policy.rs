//! Collision policy for imports.
//!
//! The merge never prompts. Callers either pass a bulk [`Resolution`] or a
//! per-name decision function wrapped in [`PerShape`].

use serde::{Deserialize, Serialize};

/// What to do when an incoming shape name already exists on the target mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Remove the existing shape and append the incoming one.
    Overwrite,
    /// Keep the existing shape and ignore the incoming one.
    Skip,
}

/// Decides each name collision during a merge.
pub trait CollisionPolicy {
    fn resolve(&mut self, name: &str) -> Resolution;
}

impl CollisionPolicy for Resolution {
    fn resolve(&mut self, _name: &str) -> Resolution {
        *self
    }
}

/// Per-name policy backed by a closure, e.g. an interactive prompt.
pub struct PerShape<F>(pub F);

impl<F: FnMut(&str) -> Resolution> CollisionPolicy for PerShape<F> {
    fn resolve(&mut self, name: &str) -> Resolution {
        (self.0)(name)
    }
}

impl<P: CollisionPolicy + ?Sized> CollisionPolicy for &mut P {
    fn resolve(&mut self, name: &str) -> Resolution {
        (**self).resolve(name)
    }
}

//! Entity identifiers
//!
//! Entities carry no data of their own. The id doubles as the index of the
//! entity's signature slot in the [`World`](super::World), so ids are handed
//! out densely in creation order.

use std::fmt;

/// Opaque handle to one game object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    /// Position of this entity in creation order
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

//! Sparse-set component storage
//!
//! Each component type lives in its own [`ComponentStorage`]: values are
//! packed densely, and a sparse table maps an entity index to its slot in the
//! dense array. Lookups by entity are O(1) and the dense array keeps values
//! contiguous.

use std::any::Any;

use super::entity::Entity;

/// Marker for types that can be attached to an entity
pub trait Component: 'static {}

/// Storage for every instance of one component type
pub struct ComponentStorage<T: Component> {
    dense: Vec<T>,
    sparse: Vec<Option<u32>>,
}

impl<T: Component> ComponentStorage<T> {
    pub fn new() -> Self {
        Self {
            dense: Vec::new(),
            sparse: Vec::new(),
        }
    }

    /// Attach `component` to `entity`, returning the value it replaced
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        let index = entity.index();
        if let Some(slot) = self.slot(entity) {
            return Some(std::mem::replace(&mut self.dense[slot], component));
        }

        if index >= self.sparse.len() {
            self.sparse.resize(index + 1, None);
        }
        self.sparse[index] = Some(self.dense.len() as u32);
        self.dense.push(component);
        None
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity).map(|slot| &self.dense[slot])
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.slot(entity).map(|slot| &mut self.dense[slot])
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.slot(entity).is_some()
    }

    pub fn len(&self) -> usize {
        self.dense.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    #[inline]
    fn slot(&self, entity: Entity) -> Option<usize> {
        self.sparse
            .get(entity.index())
            .copied()
            .flatten()
            .map(|slot| slot as usize)
    }
}

impl<T: Component> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a [`ComponentStorage`], so the world can keep every
/// component type in one map
pub trait AnyStorage {
    fn contains_entity(&self, entity: Entity) -> bool;
    fn len(&self) -> usize;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> AnyStorage for ComponentStorage<T> {
    fn contains_entity(&self, entity: Entity) -> bool {
        self.contains(entity)
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

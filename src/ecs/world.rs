//! The entity store
//!
//! Owns every entity's signature and every component storage. Systems borrow
//! the world for the duration of one call; queries borrow it mutably, so two
//! queries can never be alive at the same time.

use std::any::TypeId;
use std::collections::HashMap;

use super::entity::Entity;
use super::query::{Fetch, Filter, Query, Registry, Signature, StorageSlots};
use super::storage::{AnyStorage, Component, ComponentStorage};

#[derive(Default)]
pub struct World {
    /// Component-presence mask per entity, indexed by entity, creation order
    signatures: Vec<Signature>,
    registry: Registry,
    storages: HashMap<TypeId, Box<dyn AnyStorage>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an entity with no components
    pub fn spawn(&mut self) -> Entity {
        let entity = Entity::from_index(self.signatures.len());
        self.signatures.push(Signature::EMPTY);
        entity
    }

    /// Attach `component` to `entity`, returning any value it replaced.
    ///
    /// Returns `None` without storing anything if `entity` was not spawned
    /// by this world.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        if entity.index() >= self.signatures.len() {
            log::warn!("insert on unknown {entity}");
            return None;
        }

        let bit = self.registry.register::<T>();
        self.signatures[entity.index()] = self.signatures[entity.index()].union(bit);
        self.storage_mut::<T>().insert(entity, component)
    }

    /// Spawn an entity and attach components through a builder
    pub fn build(&mut self) -> EntityBuilder<'_> {
        let entity = self.spawn();
        EntityBuilder {
            world: self,
            entity,
        }
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storages
            .get_mut(&TypeId::of::<T>())?
            .as_any_mut()
            .downcast_mut::<ComponentStorage<T>>()?
            .get_mut(entity)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.storages
            .get(&TypeId::of::<T>())
            .is_some_and(|storage| storage.contains_entity(entity))
    }

    /// Number of entities ever spawned
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Number of entities carrying a `T`
    pub fn count<T: Component>(&self) -> usize {
        self.storages
            .get(&TypeId::of::<T>())
            .map_or(0, |storage| storage.len())
    }

    /// Query every entity carrying the components named by `Q`
    pub fn query<Q: Fetch>(&mut self) -> Query<'_, Q> {
        self.query_filtered::<Q, ()>()
    }

    /// Query with an exclusion filter, e.g. `Without<Block>`
    pub fn query_filtered<Q: Fetch, F: Filter>(&mut self) -> Query<'_, Q, F> {
        let Self {
            signatures,
            registry,
            storages,
        } = self;
        Query::new(signatures, registry, StorageSlots::new(storages))
    }

    fn storage<T: Component>(&self) -> Option<&ComponentStorage<T>> {
        self.storages
            .get(&TypeId::of::<T>())?
            .as_any()
            .downcast_ref::<ComponentStorage<T>>()
    }

    fn storage_mut<T: Component>(&mut self) -> &mut ComponentStorage<T> {
        let storage = self
            .storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(ComponentStorage::<T>::new()));
        match storage.as_any_mut().downcast_mut::<ComponentStorage<T>>() {
            Some(storage) => storage,
            None => unreachable!("storage keyed by its own TypeId"),
        }
    }
}

/// Attaches components to a freshly spawned entity
pub struct EntityBuilder<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl EntityBuilder<'_> {
    pub fn with<T: Component>(self, component: T) -> Self {
        self.world.insert(self.entity, component);
        self
    }

    pub fn id(self) -> Entity {
        self.entity
    }
}

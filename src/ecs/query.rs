//! Typed queries over capability sets
//!
//! A query names the components it needs as a tuple of references, e.g.
//! `(&mut Position, &Velocity)`, plus an optional exclusion filter such as
//! [`Without<Block>`]. Matching is decided by comparing each entity's
//! component-presence [`Signature`] against the query's required and
//! excluded masks; component access is resolved statically per tuple element.
//!
//! ```ignore
//! let mut query = world.query::<(&mut Position, &Velocity)>();
//! for entity in query.matches() {
//!     if let Some((pos, vel)) = query.get(entity) {
//!         pos.0 += vel.0 * dt;
//!     }
//! }
//! ```

use std::any::TypeId;
use std::collections::HashMap;
use std::iter::Enumerate;
use std::marker::PhantomData;
use std::slice;

use super::entity::Entity;
use super::storage::{AnyStorage, Component, ComponentStorage};

/// Upper bound on distinct component types per world
pub const MAX_COMPONENT_TYPES: usize = 64;

/// Bitmask of the component types an entity carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signature(u64);

impl Signature {
    pub const EMPTY: Signature = Signature(0);

    #[inline]
    pub fn from_bit(bit: u8) -> Self {
        Self(1 << bit)
    }

    #[inline]
    pub fn union(self, other: Signature) -> Self {
        Self(self.0 | other.0)
    }

    /// True if every bit of `other` is set here
    #[inline]
    pub fn contains(self, other: Signature) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn intersects(self, other: Signature) -> bool {
        self.0 & other.0 != 0
    }
}

/// Assigns each component type its signature bit on first use
#[derive(Debug, Default)]
pub struct Registry {
    bits: HashMap<TypeId, Signature>,
}

impl Registry {
    /// Signature bit for `T`, allocating one if `T` is new
    pub fn register<T: Component>(&mut self) -> Signature {
        let next = self.bits.len();
        *self.bits.entry(TypeId::of::<T>()).or_insert_with(|| {
            assert!(
                next < MAX_COMPONENT_TYPES,
                "a world supports at most {MAX_COMPONENT_TYPES} component types"
            );
            Signature::from_bit(next as u8)
        })
    }

    /// Signature bit for `T`, or `None` if no entity ever carried it
    pub fn get<T: Component>(&self) -> Option<Signature> {
        self.bits.get(&TypeId::of::<T>()).copied()
    }
}

/// Disjoint mutable borrows of every storage in a world
///
/// Each query element takes its own storage out; a storage can only be taken
/// once, which keeps mutable access exclusive without runtime borrow flags.
pub struct StorageSlots<'w> {
    slots: Vec<(TypeId, &'w mut Box<dyn AnyStorage>)>,
}

impl<'w> StorageSlots<'w> {
    pub(crate) fn new(storages: &'w mut HashMap<TypeId, Box<dyn AnyStorage>>) -> Self {
        Self {
            slots: storages.iter_mut().map(|(id, s)| (*id, s)).collect(),
        }
    }

    fn take<T: Component>(&mut self) -> Option<&'w mut ComponentStorage<T>> {
        let position = self
            .slots
            .iter()
            .position(|(id, _)| *id == TypeId::of::<T>())?;
        let (_, slot) = self.slots.swap_remove(position);
        let storage = &mut **slot;
        storage.as_any_mut().downcast_mut::<ComponentStorage<T>>()
    }
}

/// One element (or tuple of elements) of a query
pub trait Fetch {
    /// Borrowed storages held for the lifetime of the query
    type Guard<'w>;
    /// What a single matching entity yields
    type Item<'g>;

    /// Required components, or `None` when one was never registered
    fn signature(registry: &Registry) -> Option<Signature>;

    fn borrow<'w>(slots: &mut StorageSlots<'w>) -> Option<Self::Guard<'w>>;

    fn fetch<'g, 'w: 'g>(
        guard: &'g mut Self::Guard<'w>,
        entity: Entity,
    ) -> Option<Self::Item<'g>>;
}

impl<T: Component> Fetch for &T {
    type Guard<'w> = &'w ComponentStorage<T>;
    type Item<'g> = &'g T;

    fn signature(registry: &Registry) -> Option<Signature> {
        registry.get::<T>()
    }

    fn borrow<'w>(slots: &mut StorageSlots<'w>) -> Option<Self::Guard<'w>> {
        slots.take::<T>().map(|storage| &*storage)
    }

    fn fetch<'g, 'w: 'g>(
        guard: &'g mut Self::Guard<'w>,
        entity: Entity,
    ) -> Option<Self::Item<'g>> {
        guard.get(entity)
    }
}

impl<T: Component> Fetch for &mut T {
    type Guard<'w> = &'w mut ComponentStorage<T>;
    type Item<'g> = &'g mut T;

    fn signature(registry: &Registry) -> Option<Signature> {
        registry.get::<T>()
    }

    fn borrow<'w>(slots: &mut StorageSlots<'w>) -> Option<Self::Guard<'w>> {
        slots.take::<T>()
    }

    fn fetch<'g, 'w: 'g>(
        guard: &'g mut Self::Guard<'w>,
        entity: Entity,
    ) -> Option<Self::Item<'g>> {
        guard.get_mut(entity)
    }
}

macro_rules! impl_fetch_tuple {
    ($($name:ident),+) => {
        #[allow(non_snake_case)]
        impl<$($name: Fetch),+> Fetch for ($($name,)+) {
            type Guard<'w> = ($($name::Guard<'w>,)+);
            type Item<'g> = ($($name::Item<'g>,)+);

            fn signature(registry: &Registry) -> Option<Signature> {
                let mut signature = Signature::EMPTY;
                $(
                    let element = $name::signature(registry)?;
                    assert!(
                        !signature.intersects(element),
                        "cannot query the same component type twice"
                    );
                    signature = signature.union(element);
                )+
                Some(signature)
            }

            fn borrow<'w>(slots: &mut StorageSlots<'w>) -> Option<Self::Guard<'w>> {
                Some(($($name::borrow(slots)?,)+))
            }

            fn fetch<'g, 'w: 'g>(
                guard: &'g mut Self::Guard<'w>,
                entity: Entity,
            ) -> Option<Self::Item<'g>> {
                let ($($name,)+) = guard;
                Some(($($name::fetch($name, entity)?,)+))
            }
        }
    };
}

impl_fetch_tuple!(A);
impl_fetch_tuple!(A, B);
impl_fetch_tuple!(A, B, C);
impl_fetch_tuple!(A, B, C, D);

/// Exclusion part of a query
pub trait Filter {
    fn excluded(registry: &Registry) -> Signature;
}

impl Filter for () {
    fn excluded(_registry: &Registry) -> Signature {
        Signature::EMPTY
    }
}

/// Skip entities that carry `T`
pub struct Without<T>(PhantomData<T>);

impl<T: Component> Filter for Without<T> {
    fn excluded(registry: &Registry) -> Signature {
        registry.get::<T>().unwrap_or(Signature::EMPTY)
    }
}

/// A live query over a world
///
/// Holds the borrowed storages; iterate candidate entities with
/// [`Query::matches`] and access their components with [`Query::get`].
pub struct Query<'w, Q: Fetch, F: Filter = ()> {
    signatures: &'w [Signature],
    required: Option<Signature>,
    excluded: Signature,
    guard: Option<Q::Guard<'w>>,
    _filter: PhantomData<F>,
}

impl<'w, Q: Fetch, F: Filter> Query<'w, Q, F> {
    pub(crate) fn new(
        signatures: &'w [Signature],
        registry: &Registry,
        mut slots: StorageSlots<'w>,
    ) -> Self {
        let required = Q::signature(registry);
        let excluded = F::excluded(registry);
        let guard = required.and_then(|_| Q::borrow(&mut slots));
        Self {
            signatures,
            required,
            excluded,
            guard,
            _filter: PhantomData,
        }
    }

    /// Entities carrying the full capability set, in creation order
    pub fn matches(&self) -> Matches<'w> {
        Matches {
            signatures: self.signatures.iter().enumerate(),
            required: self.required,
            excluded: self.excluded,
        }
    }

    /// Components of `entity`, if it matches this query
    pub fn get(&mut self, entity: Entity) -> Option<Q::Item<'_>> {
        let signature = *self.signatures.get(entity.index())?;
        if !self.accepts(signature) {
            return None;
        }
        Q::fetch(self.guard.as_mut()?, entity)
    }

    /// Number of matching entities
    pub fn count(&self) -> usize {
        self.matches().count()
    }

    fn accepts(&self, signature: Signature) -> bool {
        self.required
            .is_some_and(|required| signature.contains(required))
            && !signature.intersects(self.excluded)
    }
}

/// Iterator over the entities matched by a [`Query`]
///
/// Borrows only the signature table, so the query stays free for
/// [`Query::get`] while iterating.
pub struct Matches<'w> {
    signatures: Enumerate<slice::Iter<'w, Signature>>,
    required: Option<Signature>,
    excluded: Signature,
}

impl Iterator for Matches<'_> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        let required = self.required?;
        self.signatures.find_map(|(index, signature)| {
            (signature.contains(required) && !signature.intersects(self.excluded))
                .then(|| Entity::from_index(index))
        })
    }
}

//! Minimal entity-component store
//!
//! - Entities are dense ids handed out in creation order
//! - Components live in per-type sparse sets
//! - Queries match on a component-presence bitmask and yield typed access
//!
//! Iteration always follows creation order, so anything that depends on
//! which entity is visited first stays deterministic.

pub mod entity;
pub mod query;
pub mod storage;
pub mod world;

pub use entity::Entity;
pub use query::{Fetch, Filter, Matches, Query, Signature, Without};
pub use storage::{Component, ComponentStorage};
pub use world::{EntityBuilder, World};

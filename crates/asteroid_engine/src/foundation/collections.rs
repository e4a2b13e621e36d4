//! Specialized collection types

pub use slotmap::SlotMap;

use crate::ecs::Entity;

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<Entity, T>;

//! Entity-Component-System implementation
//!
//! Actors live in a generational slot map owned by the [`World`], which also
//! drives the per-frame collision pass and answers ray casts.

pub mod actor;
pub mod components;
pub mod entity;
pub mod world;

pub use actor::{Actor, CollisionResponse};
pub use entity::Entity;
pub use world::{FrameReport, World};

#[cfg(test)]
mod tests;

//! Physics module for collision detection and ray casting
//!
//! Provides sphere collision detection accelerated by a uniform spatial grid,
//! per-frame pair resolution and grid-traversal ray casts.

pub mod collision;
pub mod collision_system;
pub mod error;
pub mod raycast;

pub use collision::{
    BoundingSphere,
    Collider,
    ColliderId,
    Ray,
    RayHit,
};
pub use collision_system::{CollisionPair, CollisionResolver, ResolverStats};
pub use error::CollisionError;
pub use raycast::{OwnerLookup, RayCaster};

//! Collision geometry
//!
//! Every collidable object is reduced to a bounding sphere: a centre taken
//! from the owner's position and a world-space radius. Broad phase (grid
//! bucketing) and narrow phase (sphere overlap) both work from that sphere.
//!
//! # Key Types
//!
//! - [`Collider`] - Per-frame snapshot stored in the spatial grid
//! - [`ColliderId`] - Stable collider identity, distinct from the owner
//! - [`BoundingSphere`] - Overlap and segment intersection tests
//! - [`Ray`], [`RayHit`] - Finite ray segments and their results

pub mod primitives;

// Re-export commonly used types
pub use primitives::{BoundingSphere, Collider, ColliderId, Ray, RayHit};
